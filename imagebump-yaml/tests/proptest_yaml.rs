//! Property-based tests for the document tree.
//!
//! These tests verify key invariants:
//! - Roundtrip: parse(text).to_string() == text for the manifest family
//! - Mutation locality: rewriting one scalar leaves all other lines intact
//! - Idempotency: setting the same value twice equals setting it once

use imagebump_yaml::{Document, Node};
use proptest::prelude::*;

/// Strategy to generate deployment-style manifests with mixed quoting and
/// comments.
fn arb_manifest() -> impl Strategy<Value = String> {
    (
        prop::string::string_regex(r"[a-z][a-z0-9-]{0,12}").unwrap(),
        prop::string::string_regex(r"v[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{1,2}").unwrap(),
        prop::string::string_regex(r"sha256:[a-f0-9]{8}").unwrap(),
        prop::bool::ANY,
        prop::bool::ANY,
    )
        .prop_map(|(name, tag, digest, quote_tag, trailing_comment)| {
            let tag_repr = if quote_tag {
                format!("\"{tag}\"")
            } else {
                tag.clone()
            };
            let comment = if trailing_comment { " # pinned" } else { "" };
            format!(
                "# generated manifest\n\
                 apiVersion: apps/v1\n\
                 spec:\n\
                 \x20\x20containers:\n\
                 \x20\x20\x20\x20- name: {name}\n\
                 \x20\x20\x20\x20\x20\x20imageTag: {tag_repr}{comment}\n\
                 \x20\x20\x20\x20\x20\x20imageDigest: '{digest}'\n"
            )
        })
}

fn set_tag(doc: &mut Document, value: &str) {
    let containers = doc
        .root_mut()
        .as_mapping_mut()
        .unwrap()
        .get_mut("spec")
        .and_then(Node::as_mapping_mut)
        .unwrap()
        .get_mut("containers")
        .and_then(Node::as_sequence_mut)
        .unwrap();
    containers.items_mut()[0]
        .as_mapping_mut()
        .unwrap()
        .get_mut("imageTag")
        .and_then(Node::as_scalar_mut)
        .unwrap()
        .set_value(value);
}

proptest! {
    #[test]
    fn roundtrip_is_identity(text in arb_manifest()) {
        let doc: Document = text.parse().expect("generated manifest parses");
        prop_assert_eq!(doc.to_string(), text);
    }

    #[test]
    fn mutation_touches_only_the_tag_line(text in arb_manifest()) {
        let mut doc: Document = text.parse().expect("generated manifest parses");
        set_tag(&mut doc, "v99.0.0");
        let out = doc.to_string();

        let before: Vec<&str> = text.lines().collect();
        let after: Vec<&str> = out.lines().collect();
        prop_assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after.iter()) {
            if b.contains("imageTag") {
                prop_assert!(a.contains("v99.0.0"));
            } else {
                prop_assert_eq!(b, a);
            }
        }
    }

    #[test]
    fn repeated_mutation_is_idempotent(text in arb_manifest()) {
        let mut once: Document = text.parse().expect("parses");
        set_tag(&mut once, "v7.7.7");

        let mut twice: Document = text.parse().expect("parses");
        set_tag(&mut twice, "v7.7.7");
        set_tag(&mut twice, "v7.7.7");

        prop_assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn reparse_after_mutation_sees_new_value(text in arb_manifest()) {
        let mut doc: Document = text.parse().expect("parses");
        set_tag(&mut doc, "v42.0.1");
        let reparsed: Document = doc.to_string().parse().expect("output parses");
        let containers = reparsed
            .root()
            .as_mapping()
            .unwrap()
            .get("spec")
            .and_then(Node::as_mapping)
            .unwrap()
            .get("containers")
            .and_then(Node::as_sequence)
            .unwrap();
        let tag = containers.items()[0]
            .as_mapping()
            .unwrap()
            .get("imageTag")
            .and_then(Node::as_scalar)
            .unwrap();
        prop_assert_eq!(tag.value(), "v42.0.1");
    }
}

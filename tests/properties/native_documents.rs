//! Property tests for native document parsers.

use proptest::prelude::*;

use asset_link::infrastructure::android::parse_font_family;
use asset_link::infrastructure::xcode::{parse_plist, XcodeProject};

const PROJECT_HEAD: &str = "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tobjects = {\n";
const PROJECT_TAIL: &str = "\t};\n\trootObject = 83CBB9F71A601CBA00E9B192;\n}\n";

/// One quoted or bare pbxproj scalar
fn scalar() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9_][A-Za-z0-9_.]{0,11}",
        "[A-Za-z0-9 _./{}();=,-]{0,12}".prop_map(|s| format!("\"{}\"", s)),
    ]
}

fn object() -> impl Strategy<Value = String> {
    ("[0-9A-F]{24}", prop::collection::vec(("[A-Za-z]{1,10}", scalar()), 1..4)).prop_map(
        |(id, fields)| {
            let body: String = fields
                .iter()
                .map(|(k, v)| format!("{} = {}; ", k, v))
                .collect();
            format!("\t\t{} /* item */ = {{isa = PBXFileReference; {}}};\n", id, body)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text as a project never panics.
    #[test]
    fn property_project_parser_never_panics(text in "(?s).{0,512}") {
        let _ = XcodeProject::parse(text);
    }

    /// PROPERTY: Parsing then printing a project reproduces it byte for byte.
    #[test]
    fn property_project_round_trips(objects in prop::collection::vec(object(), 0..6)) {
        let text = format!("{}{}{}", PROJECT_HEAD, objects.concat(), PROJECT_TAIL);
        let project = XcodeProject::parse(text.clone());
        prop_assert!(project.is_ok(), "failed to parse:\n{}", text);
        prop_assert_eq!(project.unwrap().to_string(), text);
    }

    /// PROPERTY: Parsing arbitrary text as a plist or font family never panics.
    #[test]
    fn property_xml_parsers_never_panic(text in "(?s).{0,512}") {
        let _ = parse_plist(&text);
        let _ = parse_font_family(&text);
    }
}

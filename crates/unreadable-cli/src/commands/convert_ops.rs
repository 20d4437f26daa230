use unreadable_core::{ConvertOptions, SchemeId, SegmentMode};

use crate::project::Project;

pub fn convert_cmd(project: &Project, scheme: SchemeId, text: &str, whitespace: bool) {
    let converter = die!(project.converter(), "Error loading resources: {}");
    let opts = ConvertOptions {
        mode: if whitespace {
            SegmentMode::Whitespace
        } else {
            SegmentMode::Auto
        },
        ..project.convert_options()
    };
    let out = die!(converter.convert_text(scheme, text, &opts), "Error: {}");
    println!("{out}");
}

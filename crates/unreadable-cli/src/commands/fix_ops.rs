use std::process;
use std::time::Instant;

use unreadable_core::tables::save_language_map;
use unreadable_core::{ConvertOptions, SchemeId};

use crate::project::Project;

/// Schemes whose fixup file is regenerated from the pre-tokenized source.
pub fn fixup_schemes() -> Vec<SchemeId> {
    SchemeId::ALL
        .into_iter()
        .filter(|id| id.config().generated_fixups)
        .collect()
}

pub fn fix_data(project: &Project) {
    let start = Instant::now();
    let converter = die!(project.converter(), "Error loading resources: {}");
    let source = &converter.resources().fixups.source;
    if source.is_empty() {
        eprintln!("Error: fixup source is empty or missing (data/fixed_zh_source.json)");
        process::exit(1);
    }

    let opts = ConvertOptions {
        seed: project.settings.manyogana.seed,
        ..ConvertOptions::fix_data()
    };
    eprintln!("Fixup source: {} entries", source.len());
    for scheme in fixup_schemes() {
        let conversion = die!(converter.convert(scheme, source, &opts), "Error: {}");
        let path = project.fixed_path(scheme.output_name());
        die!(save_language_map(&path, &conversion.map), "Error: {}");
        eprintln!("  → {}", path.display());
    }
    eprintln!("Done in {:.2} s", start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerated_schemes() {
        let names: Vec<&str> = fixup_schemes().iter().map(|id| id.output_name()).collect();
        for expected in ["zh_py", "zh_wg", "zh_gr", "zh_mps2", "zh_ty", "zh_yale", "zh_cy", "zh_xj"] {
            assert!(names.contains(&expected), "{expected}");
        }
        assert!(!names.contains(&"zh_split"));
        assert!(!names.contains(&"zh_ipa"));
        assert!(!names.contains(&"ja_kk"));
    }
}

use std::time::Instant;

use tracing::info;
use unreadable_core::scheme::SourceLanguage;
use unreadable_core::tables::{load_language_map, save_language_map};
use unreadable_core::{LanguageMap, SchemeId};

use crate::project::Project;

/// Source map each language's schemes read, under the source dir.
pub fn source_name(language: SourceLanguage) -> &'static str {
    match language {
        SourceLanguage::English => "en_us",
        SourceLanguage::Chinese => "zh_cn",
    }
}

/// `only` empty means every scheme.
pub fn selected_schemes(only: &[SchemeId]) -> Vec<SchemeId> {
    if only.is_empty() {
        SchemeId::ALL.to_vec()
    } else {
        let mut schemes = Vec::with_capacity(only.len());
        for id in only {
            if !schemes.contains(id) {
                schemes.push(*id);
            }
        }
        schemes
    }
}

pub fn generate(project: &Project, only: &[SchemeId]) {
    let start = Instant::now();
    let schemes = selected_schemes(only);
    let converter = die!(project.converter(), "Error loading resources: {}");
    let opts = project.convert_options();

    let mut english: Option<LanguageMap> = None;
    let mut chinese: Option<LanguageMap> = None;

    for scheme in &schemes {
        let language = scheme.config().source;
        let slot = match language {
            SourceLanguage::English => &mut english,
            SourceLanguage::Chinese => &mut chinese,
        };
        let source = slot.get_or_insert_with(|| {
            let path = project.source_map_path(source_name(language));
            die!(load_language_map(&path), "Error loading source map: {}")
        });

        let conversion = die!(converter.convert(*scheme, source, &opts), "Error: {}");
        let path = project.output_path(scheme.output_name());
        die!(save_language_map(&path, &conversion.map), "Error: {}");
        info!(
            %scheme,
            entries = conversion.map.len(),
            elapsed_ms = conversion.elapsed.as_millis() as u64,
            "wrote language file"
        );
        eprintln!(
            "  {:<11}{:>7} entries  {:>6.2} s",
            scheme.output_name(),
            conversion.map.len(),
            conversion.elapsed.as_secs_f64()
        );
    }

    eprintln!(
        "Generated {} language files in {:.2} s",
        schemes.len(),
        start.elapsed().as_secs_f64()
    );
}

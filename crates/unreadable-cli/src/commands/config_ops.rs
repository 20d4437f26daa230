use std::fs;

use unreadable_core::{romaji, settings, SchemeId};

pub fn schemes() {
    for id in SchemeId::ALL {
        let cfg = id.config();
        println!(
            "{:<11} {:<8} {}",
            id.output_name(),
            format!("{:?}", cfg.source).to_lowercase(),
            id.description()
        );
    }
}

pub fn romaji_export() {
    print!("{}", romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(romaji::parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: paths.output_dir={}, segmentation.hmm={}, fetch.channel={:?}, pack.exclude={:?}",
        s.paths.output_dir, s.segmentation.hmm, s.fetch.channel, s.pack.exclude
    );
}

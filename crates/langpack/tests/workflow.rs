//! End-to-end run of the create, translate, build, check and install steps.

use std::fs;

use langpack::config::TableConfig;
use langpack::{
    build_pack_file, check_pack, create_mapping_file, install, InstallOptions, InstallOutcome,
    Mapping,
};

const SOURCE: &str = "Language,English,简体中文\r\n\r\nNormalText\r\n\
\"UI_Start\",\"Start\",\"开始\"\r\n\
\"UI_Quit\",\"Quit\",\"退出\"\r\n\
\"Tip_Reload\",\"Press \"\"R\"\" to reload, then aim\",\"按\"\"R\"\"换弹\"\r\n";

#[test]
fn test_translate_and_install_pack() {
    let dir = tempfile::tempdir().unwrap();
    let table_config = TableConfig::default();

    let source = dir.path().join("#GF_hypocritical.csv");
    fs::write(&source, SOURCE).unwrap();

    // Step 1: extract the mapping.
    let mapping_path = dir.path().join("translations_to_edit.csv");
    let created = create_mapping_file(&source, &mapping_path, &table_config).unwrap();
    assert_eq!(created.entries, 3);

    // Step 2: translate two of the three rows, as a translator would.
    let mut mapping = Mapping::read(&mapping_path).unwrap();
    assert_eq!(mapping.get("Tip_Reload"), Some("Press \"R\" to reload, then aim"));
    mapping.insert("UI_Start", "Démarrer");
    mapping.insert("Tip_Reload", "Appuyez sur \"R\" pour recharger");
    mapping.write(&mapping_path, table_config.line_ending).unwrap();

    let pack = dir.path().join("#GF_french.csv");
    let built = build_pack_file(&source, &mapping_path, &pack, &table_config).unwrap();
    // Untouched rows carry the reference text over from the mapping.
    assert_eq!(built.updated, 3);
    assert!(built.unknown_keys.is_empty());

    let written = fs::read_to_string(&pack).unwrap();
    assert!(written.starts_with("Language,English,简体中文\r\n\r\nNormalText\r\n"));
    assert!(written.contains("\"UI_Start\",\"Start\",\"Démarrer\"\r\n"));
    assert!(written.contains("\"UI_Quit\",\"Quit\",\"Quit\"\r\n"));
    assert!(written.contains(
        "\"Tip_Reload\",\"Press \"\"R\"\" to reload, then aim\",\"Appuyez sur \"\"R\"\" pour recharger\"\r\n"
    ));

    let checked = check_pack(&pack, Some(source.as_path()), &table_config).unwrap();
    assert!(checked.is_ok(), "{checked:?}");

    // Step 3: install into the game's language folder.
    let language_dir = dir.path().join("game").join("language");
    fs::create_dir_all(&language_dir).unwrap();

    let first = install(&pack, &language_dir, InstallOptions::default()).unwrap();
    assert_eq!(first.outcome, InstallOutcome::Installed);
    assert_eq!(fs::read_to_string(language_dir.join("#GF_french.csv")).unwrap(), written);

    let again = install(&pack, &language_dir, InstallOptions::default()).unwrap();
    assert_eq!(again.outcome, InstallOutcome::Unchanged);
}

use jobpulse_core::{ItemKind, PROFILE_EXPORT_FILE};
use jobpulse_storage::Storage;
use jobpulse_test::sample_profile;

#[test]
fn export_then_import_round_trips() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Storage::open(dir.path().join("a.db"))?;
    let profile = sample_profile();
    source.save_profile(&profile)?;

    let file = dir.path().join(PROFILE_EXPORT_FILE);
    source.export_profile(&file)?;

    let target = Storage::open(dir.path().join("b.db"))?;
    let imported = target.import_profile(&file)?;
    assert_eq!(imported, profile);
    assert_eq!(target.load_profile()?, profile);
    Ok(())
}

#[test]
fn invalid_import_keeps_stored_profile() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = Storage::open(dir.path().join("jobpulse.db"))?;
    let profile = sample_profile();
    storage.save_profile(&profile)?;

    let file = dir.path().join("broken.json");
    std::fs::write(&file, "[\"not\", \"an object\"]")?;
    assert!(storage.import_profile(&file).is_err());
    assert_eq!(storage.load_profile()?, profile);
    Ok(())
}

#[test]
fn removed_entries_stay_removed_after_reload() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("jobpulse.db");
    let mut profile = sample_profile();
    let id = profile.projects[0].id.clone();
    assert!(profile.remove_item(ItemKind::Project, &id));
    assert!(!profile.remove_item(ItemKind::Project, &id));

    Storage::open(&path)?.save_profile(&profile)?;
    let reloaded = Storage::open(&path)?.load_profile()?;
    assert!(reloaded.projects.is_empty());
    assert_eq!(reloaded.experiences.len(), 1);
    Ok(())
}

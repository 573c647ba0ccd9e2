/*!
 * Full app lifecycle tests: config, initial files, scripted commands, save
 */

use std::fs;
use std::io::BufReader;
use anyhow::Result;
use subfixer::alignment::Column;
use subfixer::app_config::Config;
use subfixer::app_controller::Controller;
use crate::common;

#[test]
fn test_lifecycle_withScriptFile_shouldRepairAndBackup() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let (good, bad) = common::create_subtitle_pair(temp_dir.path())?;
    let config_path = common::create_test_file(
        temp_dir.path(),
        "subfixer.json",
        r#"{ "backup": { "suffix": ".orig" } }"#,
    )?;
    let script = common::create_test_file(
        temp_dir.path(),
        "fixes.txt",
        "# join the split line, then borrow the missing one\nmerge 2-3\n-> 4\nshow\nsave\nstatus\nquit\n",
    )?;

    let config = Config::from_file(&config_path)?;
    let mut controller = Controller::with_config(config)?;
    controller.open_initial(Some(&good), Some(&bad));

    let mut out = Vec::new();
    controller.run(BufReader::new(fs::File::open(&script)?), &mut out, false)?;
    let output = String::from_utf8(out)?;

    assert!(output.contains(&format!("File {} saved successfully", bad.display())));
    assert!(output.contains("bad file: "));
    assert!(!output.contains("(modified)"));
    assert!(!output.contains("Error"));

    assert!(temp_dir.path().join("movie.fr.orig.srt").exists());
    assert!(!temp_dir.path().join("movie.fr-backup.srt").exists());
    assert!(!controller.session().document(Column::Bad).is_dirty());

    let saved = fs::read_to_string(&bad)?;
    assert!(saved.contains("Deux\nsuite"));
    assert!(saved.contains("4\n00:00:07,000 --> 00:00:08,000\nFour\n"));
    Ok(())
}

#[test]
fn test_lifecycle_openingFilesFromShell_shouldLoadBothColumns() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let (good, bad) = common::create_subtitle_pair(temp_dir.path())?;
    let mut controller = Controller::with_config(Config::default())?;

    let script = format!("open bad {}\nopen good {}\nopen good {}\n", bad.display(), good.display(), temp_dir.path().join("x.mkv").display());
    let mut out = Vec::new();
    controller.run(script.as_bytes(), &mut out, false)?;
    let output = String::from_utf8(out)?;

    // The bad file came first, so it defines the first four rows' timing
    let table = controller.session().table();
    assert_eq!(table.len(), 5);
    assert_eq!(table.row(0).unwrap().start.to_string(), "00:00:01,100");
    assert_eq!(table.row(4).unwrap().start.to_string(), "00:00:09,000");
    assert_eq!(table.row(4).unwrap().bad_text, None);
    assert!(output.contains("Not a valid subtitle file"));
    assert_eq!(controller.session().document(Column::Good).path(), Some(good.as_path()));
    Ok(())
}

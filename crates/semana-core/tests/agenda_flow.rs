use std::ffi::OsString;
use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use semana_agenda::{AgendaManager, Day, Locale, Schedule, Store, TaskDraft};
use semana_core::datastore::FileStorage;
use tempfile::tempdir;

fn run_cli(data: &Path, args: &[&str]) -> anyhow::Result<()> {
    let mut argv: Vec<OsString> = vec![
        "semana".into(),
        "--semanarc".into(),
        "/dev/null".into(),
        "--data".into(),
        data.as_os_str().to_os_string(),
        "rc.color=off".into(),
    ];
    argv.extend(args.iter().map(OsString::from));
    semana_core::run(argv)
}

fn stored(data: &Path) -> Schedule {
    let storage = FileStorage::open(data).expect("open storage");
    Store::new(storage).load().expect("load stored schedule")
}

#[test]
fn cli_add_edit_remove_flow() {
    let temp = tempdir().expect("tempdir");

    run_cli(temp.path(), &["add", "Team", "sync", "--day", "tue", "--time", "09:00"])
        .expect("add team sync");
    run_cli(temp.path(), &["add", "Standup", "--day", "Tuesday", "--time", "8:30"])
        .expect("add standup");

    let schedule = stored(temp.path());
    let tuesday: Vec<&str> = schedule
        .tasks(Day::Tuesday)
        .iter()
        .map(|task| task.description.as_str())
        .collect();
    assert_eq!(tuesday, vec!["Standup", "Team sync"]);

    let standup = schedule.tasks(Day::Tuesday)[0].id.clone();
    run_cli(
        temp.path(),
        &["edit", standup.as_str(), "--day", "wednesday"],
    )
    .expect("move standup");

    let schedule = stored(temp.path());
    assert_eq!(schedule.tasks(Day::Tuesday).len(), 1);
    assert_eq!(schedule.tasks(Day::Wednesday)[0].id, standup);
    assert_eq!(schedule.tasks(Day::Wednesday)[0].time, "08:30");

    run_cli(temp.path(), &["remove", standup.as_str(), "--yes"]).expect("remove standup");
    let schedule = stored(temp.path());
    assert!(schedule.find(&standup).is_none());
    assert_eq!(schedule.days().count(), 1);
}

#[test]
fn cli_rejects_blank_description_without_touching_storage() {
    let temp = tempdir().expect("tempdir");
    run_cli(temp.path(), &["add", "Gym", "--day", "mon", "--time", "07:00"]).expect("add gym");
    let before = fs::read_to_string(temp.path().join("weeklyAgenda.json")).expect("read raw");

    let result = run_cli(temp.path(), &["add", "  ", "--day", "mon", "--time", "08:00"]);
    assert!(result.is_err());

    let after = fs::read_to_string(temp.path().join("weeklyAgenda.json")).expect("read raw");
    assert_eq!(before, after);
}

#[test]
fn cli_edit_of_unknown_id_fails() {
    let temp = tempdir().expect("tempdir");
    let result = run_cli(temp.path(), &["edit", "12345", "--time", "10:00"]);
    assert!(result.is_err());
}

#[test]
fn corrupt_payload_is_discarded_on_next_save() {
    let temp = tempdir().expect("tempdir");
    fs::write(temp.path().join("weeklyAgenda.json"), "{\"Monday\": 42}").expect("seed garbage");

    run_cli(temp.path(), &["show"]).expect("show survives corrupt storage");
    run_cli(temp.path(), &["add", "Read", "--day", "sun", "--time", "21:00"]).expect("add read");

    let schedule = stored(temp.path());
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule.tasks(Day::Sunday)[0].description, "Read");
}

#[test]
fn render_writes_markup_file() {
    let temp = tempdir().expect("tempdir");
    run_cli(temp.path(), &["rc.locale=pt", "add", "Feira", "--day", "sábado", "--time", "10:00"])
        .expect("add feira");

    let out = temp.path().join("week.html");
    run_cli(
        temp.path(),
        &["rc.locale=pt", "render", "--output", out.to_str().expect("utf8 path")],
    )
    .expect("render markup");

    let markup = fs::read_to_string(&out).expect("read markup");
    assert!(markup.contains("<div class=\"day-header\">Segunda-feira</div>"));
    assert!(markup.contains("<div class=\"day-header\">Sábado</div>"));
    assert!(markup.contains("<div class=\"task-content\">Feira</div>"));
}

#[test]
fn file_backed_manager_round_trips_schedule() {
    let temp = tempdir().expect("tempdir");
    let now = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid now");

    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut agenda = AgendaManager::open(Store::new(storage), Locale::En, now);
    for (description, day, time) in [
        ("Team sync", Day::Tuesday, "09:00"),
        ("Standup", Day::Tuesday, "08:30"),
        ("Yoga", Day::Saturday, "10:00"),
    ] {
        agenda
            .add_or_update(TaskDraft::new(description, day, time), now)
            .expect("add task");
    }

    assert_eq!(&stored(temp.path()), agenda.schedule());
}

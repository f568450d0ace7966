// File: tests/session_flow.rs
use echo::config::Config;
use echo::context::{AppContext, TestContext};
use echo::controller::Session;
use echo::messages::DIVIDER;
use std::fs;

fn open(ctx: &TestContext) -> Session {
    Session::open(ctx, &Config::default()).unwrap()
}

#[test]
fn test_full_conversation() {
    let ctx = TestContext::new();
    let mut s = open(&ctx);
    assert!(s.load_warning().is_none());
    assert!(s.greeting().contains("Echo"));

    let added = s.handle("todo read book");
    assert!(!added.exit);
    assert!(added.text.starts_with(DIVIDER));
    assert!(added.text.contains("[T][ ] read book"));
    assert!(added.text.contains("Now you have 1 task in the list."));

    let added = s.handle("deadline return book /by 2026-06-06 1400");
    assert!(added.text.contains("[D][ ] return book (by: 6 Jun 2026 1400)"));
    assert!(added.text.contains("Now you have 2 tasks in the list."));

    let marked = s.handle("mark 1");
    assert!(marked.text.contains("[T][X] read book"));

    let list = s.handle("LIST");
    assert!(list.text.contains("1. [T][X] read book"));
    assert!(list.text.contains("2. [D][ ] return book (by: 6 Jun 2026 1400)"));

    let found = s.handle("find return");
    assert!(found.text.contains("1. [D][ ] return book"));
    assert!(!found.text.contains("read book"));

    let removed = s.handle("delete 1");
    assert!(removed.text.contains("[T][X] read book"));
    assert!(removed.text.contains("Now you have 1 task in the list."));

    let bye = s.handle("bye");
    assert!(bye.exit);
    assert!(bye.text.contains("Bye"));
}

#[test]
fn test_errors_leave_the_list_alone() {
    let ctx = TestContext::new();
    let mut s = open(&ctx);
    s.handle("todo keep me");

    for line in [
        "blah",
        "todo",
        "deadline x /by friday",
        "event x /from 2026-02-25 1800 /to 2026-02-24 1500",
        "mark 0",
        "unmark 9",
        "delete two",
    ] {
        let reply = s.handle(line);
        assert!(!reply.exit, "{line}");
        assert!(reply.text.starts_with(DIVIDER), "{line}");
        assert_eq!(s.store().len(), 1, "{line}");
    }

    assert!(s.handle("mark 0").text.contains("There is no such thing as task 0."));
    assert!(s.handle("mark 2").text.contains("You do not have 2 tasks yet."));
}

#[test]
fn test_conflict_is_reported_but_task_kept() {
    let ctx = TestContext::new();
    let mut s = open(&ctx);
    s.handle("deadline sweep floor /by 2026-01-23 1800");

    let reply = s.handle("event meeting /from 2026-01-23 1800 /to 2026-01-23 1900");
    assert!(reply.text.contains("clashes"));
    assert!(reply.text.contains("sweep floor"));
    assert_eq!(s.store().len(), 2);
}

#[test]
fn test_tasks_persist_across_sessions() {
    let ctx = TestContext::new();
    {
        let mut s = open(&ctx);
        s.handle("todo read book");
        s.handle("event fair /from 2026-06-07 1000 /to 2026-06-07 1600");
        s.handle("mark 2");
        s.handle("bye");
    }

    let mut s = open(&ctx);
    assert!(s.load_warning().is_none());
    assert_eq!(s.store().len(), 2);
    let list = s.handle("list");
    assert!(list.text.contains("1. [T][ ] read book"));
    assert!(list.text.contains("2. [E][X] fair (from: 7 Jun 2026 1000 to: 7 Jun 2026 1600)"));
}

#[test]
fn test_multi_line_description_is_rejected_and_file_stays_loadable() {
    let ctx = TestContext::new();
    {
        let mut s = open(&ctx);
        s.handle("todo keep me");
        let reply = s.handle("todo a\nb");
        assert!(reply.text.contains("must fit on one line"));
        assert_eq!(s.store().len(), 1);
    }

    let s = open(&ctx);
    assert!(s.load_warning().is_none());
    assert_eq!(s.store().len(), 1);
    assert_eq!(s.store().tasks()[0].description, "keep me");
}

#[test]
fn test_corrupt_file_starts_empty_and_keeps_backup() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path("tasks.txt").unwrap();
    fs::write(&path, "T | 0 | fine\nnonsense\n").unwrap();

    let mut s = open(&ctx);
    assert!(s.store().is_empty());
    let warning = s.load_warning().unwrap();
    assert!(warning.contains("Starting with an empty list."));
    assert!(warning.contains("tasks.txt.bak"));

    let backup = path.with_file_name("tasks.txt.bak");
    assert_eq!(
        fs::read_to_string(&backup).unwrap(),
        "T | 0 | fine\nnonsense\n"
    );

    s.handle("todo fresh start");
    assert_eq!(fs::read_to_string(&path).unwrap(), "T | 0 | fresh start\n");
    // The backup is never overwritten by later saves.
    assert_eq!(
        fs::read_to_string(&backup).unwrap(),
        "T | 0 | fine\nnonsense\n"
    );
}

#[test]
fn test_second_corrupt_file_does_not_replace_first_backup() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path("tasks.txt").unwrap();

    fs::write(&path, "T | 0 | precious\nbroken\n").unwrap();
    let first = open(&ctx);
    assert!(first.load_warning().unwrap().contains("tasks.txt.bak"));
    drop(first);

    fs::write(&path, "also broken\n").unwrap();
    let second = open(&ctx);
    assert!(second.load_warning().unwrap().contains("tasks.txt.1.bak"));

    assert_eq!(
        fs::read_to_string(path.with_file_name("tasks.txt.bak")).unwrap(),
        "T | 0 | precious\nbroken\n"
    );
    assert_eq!(
        fs::read_to_string(path.with_file_name("tasks.txt.1.bak")).unwrap(),
        "also broken\n"
    );
}

#[test]
fn test_custom_data_file_name() {
    let ctx = TestContext::new();
    let config = Config {
        data_file: "chores.txt".to_string(),
        ..Config::default()
    };
    let mut s = Session::open(&ctx, &config).unwrap();
    s.handle("todo dishes");

    let path = ctx.get_task_file_path("chores.txt").unwrap();
    assert_eq!(s.path(), path.as_path());
    assert_eq!(fs::read_to_string(path).unwrap(), "T | 0 | dishes\n");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::Sandbox;

#[test]
fn add_writes_marker_pair_and_metadata() {
    let sb = Sandbox::new();
    sb.aj(&["add", "n8n", "wf-123", "daily at 9am", "Daily Standup"])
        .passes()
        .stdout_has("Scheduled 'daily-standup' (0 9 * * *)");

    let crontab = sb.crontab();
    assert!(crontab.contains("# aj job: Daily Standup\n"));
    assert!(crontab.contains("0 9 * * * cd "));
    assert!(crontab.contains("run-n8n.sh wf-123 --provider openai"));
    assert!(crontab.contains("--log-file"));
    assert!(sb.job_record("daily-standup").is_file());
}

#[test]
fn add_passes_optional_flags_through_to_the_command() {
    let sb = Sandbox::new();
    sb.aj(&[
        "add",
        "langflow",
        "flow-7",
        "every 15 minutes",
        "Sync Inbox",
        "--provider",
        "ollama",
        "--input",
        "check new mail",
        "--background",
    ])
    .passes();

    let crontab = sb.crontab();
    assert!(crontab.contains("*/15 * * * * cd "));
    assert!(crontab.contains("run-langflow.sh flow-7 --provider ollama"));
    assert!(crontab.contains("--input 'check new mail'"));
    assert!(crontab.contains("--background"));
}

#[test]
fn weekly_schedule_maps_weekday_to_cron_field() {
    let sb = Sandbox::new();
    sb.aj(&[
        "add",
        "flowise",
        "report-1",
        "every friday at 5pm",
        "Weekly Report",
    ])
    .passes()
    .stdout_has("0 17 * * 5");
}

#[test]
fn duplicate_description_is_rejected() {
    let sb = Sandbox::new();
    sb.add_standup();
    let before = sb.crontab();
    sb.aj(&["add", "n8n", "wf-999", "hourly", "Daily Standup"])
        .fails_with(1)
        .stderr_has("already exists");
    assert_eq!(sb.crontab(), before);
}

#[test]
fn unparseable_schedule_leaves_no_trace() {
    let sb = Sandbox::new();
    sb.aj(&["add", "n8n", "wf-123", "sometime next week", "Vague Job"])
        .fails_with(1)
        .stderr_has("sometime next week");
    assert_eq!(sb.crontab(), "");
    assert!(!sb.job_record("vague-job").exists());
}

#[test]
fn description_with_no_letters_or_digits_is_rejected() {
    let sb = Sandbox::new();
    sb.aj(&["add", "n8n", "wf-123", "daily at 9am", "!!!"])
        .fails_with(1)
        .stderr_has("cannot be scheduled");
    assert_eq!(sb.crontab(), "");
}

#[test]
fn list_shows_description_and_state() {
    let sb = Sandbox::new();
    sb.add_standup();
    sb.aj(&["list"])
        .passes()
        .stdout_has("daily-standup")
        .stdout_has("Daily Standup")
        .stdout_has("0 9 * * *")
        .stdout_has("ok");
}

#[test]
fn list_empty_store_says_so() {
    let sb = Sandbox::new();
    sb.aj(&["list"]).passes().stdout_has("No jobs scheduled");
}

#[test]
fn list_json_carries_full_records() {
    let sb = Sandbox::new();
    sb.add_standup();
    let run = sb.aj(&["list", "--format", "json"]);
    let json = run.stdout_json();
    assert_eq!(json[0]["name"], "daily-standup");
    assert_eq!(json[0]["state"], "synced");
    assert_eq!(json[0]["record"]["agent_type"], "n8n");
    assert_eq!(json[0]["record"]["target_id"], "wf-123");
}

#[test]
fn entry_without_metadata_is_flagged_untracked() {
    let sb = Sandbox::new();
    sb.seed_crontab("# aj job: Hand Edited\n0 6 * * * echo hi\n");
    sb.aj(&["list"])
        .passes()
        .stdout_has("hand-edited")
        .stdout_has("untracked (no metadata record)");
}

#[test]
fn remove_by_slug_deletes_entry_and_record() {
    let sb = Sandbox::new();
    sb.add_standup();
    sb.aj(&["remove", "daily-standup"])
        .passes()
        .stdout_has("Removed 'daily-standup'");
    assert!(!sb.crontab().contains("Daily Standup"));
    assert!(!sb.job_record("daily-standup").exists());
}

#[test]
fn remove_by_original_description() {
    let sb = Sandbox::new();
    sb.add_standup();
    sb.aj(&["remove", "Daily Standup"]).passes();
    assert!(!sb.crontab().contains("Daily Standup"));
}

#[test]
fn remove_missing_job_changes_nothing() {
    let sb = Sandbox::new();
    sb.add_standup();
    let before = sb.crontab();
    sb.aj(&["remove", "no-such-job"])
        .fails_with(1)
        .stderr_has("no-such-job");
    assert_eq!(sb.crontab(), before);
    assert!(sb.job_record("daily-standup").is_file());
}

#[test]
fn unrelated_crontab_lines_survive_add_and_remove() {
    let sb = Sandbox::new();
    sb.seed_crontab("MAILTO=ops@example.com\n0 3 * * * /usr/local/bin/backup.sh\n");
    sb.add_standup();
    sb.aj(&["remove", "daily-standup"]).passes();
    let crontab = sb.crontab();
    assert!(crontab.contains("MAILTO=ops@example.com"));
    assert!(crontab.contains("/usr/local/bin/backup.sh"));
    assert!(!crontab.contains("Daily Standup"));
}

#[test]
fn status_reports_running_service_and_jobs() {
    let sb = Sandbox::new();
    sb.add_standup();
    sb.aj(&["status"])
        .passes()
        .stdout_has("Scheduler service: running")
        .stdout_has("daily-standup");
}

#[test]
fn status_json_has_service_and_jobs_fields() {
    let sb = Sandbox::new();
    sb.add_standup();
    let run = sb.aj(&["status", "--format", "json"]);
    let json = run.stdout_json();
    assert_eq!(json["service_running"], true);
    assert_eq!(json["jobs"][0]["name"], "daily-standup");
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ADMIN: &str = "admin@example.com";
const MANAGER: &str = "priya.sharma@example.com";
const EMPLOYEE: &str = "raj.kumar@example.com";

fn claims(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("claims").unwrap();
    cmd.env("CLAIMS_DATA_DIR", dir.path())
        .env_remove("CLAIMS_USER")
        .env_remove("CLAIMS_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Initialized data dir with one manager and one employee
fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();

    claims(&dir)
        .args(["init", "--admin-email", ADMIN])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    claims(&dir)
        .args(["--user", ADMIN, "user", "add", MANAGER, "Priya Sharma", "--role", "manager"])
        .assert()
        .success();
    claims(&dir)
        .args(["--user", ADMIN, "user", "add", EMPLOYEE, "Raj Kumar"])
        .assert()
        .success();

    dir
}

fn submit(dir: &TempDir, date: &str, description: &str, amount: &str) -> String {
    let output = claims(dir)
        .args([
            "--user",
            EMPLOYEE,
            "claim",
            "submit",
            "--date",
            date,
            "--description",
            description,
            "--amount",
            amount,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Submitted claim: "))
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();
    claims(&dir).arg("init").assert().success();

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("claims.json").exists());
    assert!(dir.path().join("data").join("users.json").exists());
}

#[test]
fn test_unknown_user_is_refused() {
    let dir = setup();
    claims(&dir)
        .args(["--user", "stranger@example.com", "claim", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an authorized user"));
}

#[test]
fn test_user_from_environment() {
    let dir = setup();
    claims(&dir)
        .env("CLAIMS_USER", EMPLOYEE)
        .args(["claim", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My Claims Report"));
}

#[test]
fn test_submit_and_list() {
    let dir = setup();
    submit(&dir, "2024-11-20", "Client Meeting Lunch", "2500");

    claims(&dir)
        .args(["--user", MANAGER, "claim", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manager Claims Report"))
        .stdout(predicate::str::contains("Client Meeting Lunch"))
        .stdout(predicate::str::contains("Raj Kumar"));
}

#[test]
fn test_invalid_amount_is_rejected() {
    let dir = setup();
    claims(&dir)
        .args([
            "--user", EMPLOYEE, "claim", "submit", "--date", "2024-11-20", "--description",
            "Taxi", "--amount", "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0"));
}

#[test]
fn test_review_flow() {
    let dir = setup();
    let id = submit(&dir, "2024-11-18", "Hotel Stay", "8500");

    claims(&dir)
        .args(["--user", EMPLOYEE, "claim", "approve", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not permitted"));

    claims(&dir)
        .args(["--user", MANAGER, "claim", "approve", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved claim"));

    claims(&dir)
        .args(["--user", MANAGER, "claim", "reject", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already Approved"));

    claims(&dir)
        .args(["--user", EMPLOYEE, "claim", "delete", &id])
        .assert()
        .failure();

    claims(&dir)
        .args(["--user", EMPLOYEE, "claim", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved by: Priya Sharma"));
}

#[test]
fn test_owner_deletes_pending_claim() {
    let dir = setup();
    let id = submit(&dir, "2024-11-18", "Taxi", "450");

    claims(&dir)
        .args(["--user", EMPLOYEE, "claim", "delete", &id])
        .assert()
        .success();

    claims(&dir)
        .args(["--user", EMPLOYEE, "claim", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No claims found."));
}

#[test]
fn test_export_csv() {
    let dir = setup();
    submit(&dir, "2024-11-20", "Client Meeting Lunch", "2500");
    submit(&dir, "2024-11-18", "Hotel Stay", "8500");

    let out = TempDir::new().unwrap();
    claims(&dir)
        .args(["--user", MANAGER, "export", "csv", "--title", "Team", "--output"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 claims"));

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d");
    let path = out.path().join(format!("Team_{}.csv", today));
    let contents = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "Date,Employee,Email,Description,Amount,Status");
    assert_eq!(
        lines[1],
        "2024-11-20,Raj Kumar,raj.kumar@example.com,Client Meeting Lunch,2500,Pending"
    );
    assert_eq!(
        lines[2],
        "2024-11-18,Raj Kumar,raj.kumar@example.com,Hotel Stay,8500,Pending"
    );
}

#[test]
fn test_export_xlsx_uses_role_title() {
    let dir = setup();
    submit(&dir, "2024-11-20", "Client Meeting Lunch", "2500");

    let out = TempDir::new().unwrap();
    claims(&dir)
        .args(["--user", EMPLOYEE, "export", "xlsx", "--status", "approved", "--output"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 claims"));

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d");
    let path = out.path().join(format!("My Claims Report_{}.xlsx", today));
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_user_management_requires_admin() {
    let dir = setup();
    claims(&dir)
        .args(["--user", MANAGER, "user", "add", "new@example.com", "New Person"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("admin role"));

    claims(&dir)
        .args(["--user", ADMIN, "user", "add", EMPLOYEE, "Duplicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    claims(&dir)
        .args(["--user", ADMIN, "user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Priya Sharma"))
        .stdout(predicate::str::contains("manager"));
}

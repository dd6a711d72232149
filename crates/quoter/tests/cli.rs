use quoter_test_utils::assert_snapshot;
use quoter_test_utils::sandbox::Sandbox;
use serde_json::Value;

const ADDRESS: &str = "123 Main Street, Sydney NSW 2000";

fn quote(sb: &Sandbox, service: &str, name: &str) -> String {
    sb.run(
        "quoter",
        [
            "quote",
            "--service",
            service,
            "--name",
            name,
            "--address",
            ADDRESS,
            "--format",
            "text",
        ],
    )
    .expect("quote failed")
}

fn list_json(sb: &Sandbox, extra: &[&str]) -> Vec<Value> {
    let mut args = vec!["list", "--format", "json"];
    args.extend_from_slice(extra);
    let out = sb.run("quoter", args).expect("list failed");
    serde_json::from_str::<Value>(&out)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn test_init_creates_default_ledger() {
    let sb = Sandbox::new();
    let out = sb.run("quoter", ["init"]).unwrap();
    assert!(out.contains("Created quote ledger"));
    assert_eq!(
        std::fs::read_to_string(sb.default_ledger()).unwrap(),
        "Date,Time,Customer_Name,Customer_Email,Customer_Address,Service,Price,Status\n"
    );

    let again = sb.run("quoter", ["init"]).unwrap();
    assert!(again.contains("already exists"));
}

#[test]
fn test_services_lists_catalog() {
    let sb = Sandbox::new();
    let out = sb.run("quoter", ["services", "--format", "json"]).unwrap();
    let services: Vec<Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(services.len(), 10);
    assert_eq!(services[0]["key"], "powerpoint_install");
    assert_eq!(services[0]["name"], "Power Point Install");

    let table = sb.run("quoter", ["services"]).unwrap();
    assert!(table.contains("Switchboard Upgrade"));
    assert!(table.contains("$2850.00"));
}

#[test]
fn test_quote_prints_document_and_records_it() {
    let sb = Sandbox::new();
    let doc = quote(&sb, "ceiling_fan_fitoff", "John Smith");
    assert_snapshot!("quote_text", doc);

    let listed = list_json(&sb, &[]);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["position"], 0);
    assert_eq!(listed[0]["Customer_Name"], "John Smith");
    assert_eq!(listed[0]["Customer_Address"], ADDRESS);
    assert_eq!(listed[0]["Service"], "Ceiling Fan Fit-off");
    assert_eq!(listed[0]["Price"], "245.00");
    assert_eq!(listed[0]["Status"], "Sent");
}

#[test]
fn test_quote_no_save_leaves_ledger_alone() {
    let sb = Sandbox::new();
    sb.run(
        "quoter",
        [
            "quote", "-s", "downlight_install", "-n", "Ann", "-a", ADDRESS, "--no-save",
        ],
    )
    .unwrap();
    assert!(!sb.default_ledger().exists());
}

#[test]
fn test_quote_validation_errors() {
    let sb = Sandbox::new();

    let out = sb.output("quoter", ["quote", "-s", "downlight_install", "-a", ADDRESS]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Please enter a customer name."));

    let out = sb.output("quoter", ["quote", "-s", "downlight_install", "-n", "Ann"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Please enter a customer address."));

    let out = sb.output(
        "quoter",
        ["quote", "-s", "downlight_install", "-n", "Ann", "-a", "10 Downing Street, London"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("valid Australian address"));

    let out = sb.output("quoter", ["quote", "-s", "rewire", "-n", "Ann", "-a", ADDRESS]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown service 'rewire'"));

    assert!(!sb.default_ledger().exists());
}

#[test]
fn test_list_search_keeps_positions() {
    let sb = Sandbox::new();
    quote(&sb, "powerpoint_install", "John Smith");
    quote(&sb, "downlight_install", "Mary Jones");
    quote(&sb, "data_point_install", "Johnny Walker");

    let hits = list_json(&sb, &["--search", "SMITH"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["position"], 0);

    let hits = list_json(&sb, &["--search", "john"]);
    let positions: Vec<_> = hits.iter().map(|h| h["position"].as_u64().unwrap()).collect();
    assert_eq!(positions, [0, 2]);

    let table = sb.run("quoter", ["list", "--search", "nobody"]).unwrap();
    assert!(table.contains("No quotes found"));

    let csv = sb.run("quoter", ["list", "--format", "csv", "--search", "mary"]).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Mary Jones"));
    assert!(lines[1].ends_with(",95.00,Sent"));
}

#[test]
fn test_status_and_stats_end_to_end() {
    let sb = Sandbox::new();
    quote(&sb, "powerpoint_install", "One");
    quote(&sb, "ceiling_fan_fitoff", "Two");
    quote(&sb, "switchboard_upgrade", "Three");

    let before = sb.run("quoter", ["stats"]).unwrap();
    assert!(!before.contains("Win rate"));

    let out = sb.run("quoter", ["status", "1", "Won"]).unwrap();
    assert!(out.contains("Quote #1 (Two) marked Won"));
    sb.run("quoter", ["status", "2", "lost"]).unwrap();

    let stats: Value =
        serde_json::from_str(&sb.run("quoter", ["stats", "--format", "json"]).unwrap()).unwrap();
    assert_eq!(stats["total_count"], 3);
    assert_eq!(stats["total_value"], "3260.00");
    assert_eq!(stats["won_count"], 1);
    assert_eq!(stats["lost_count"], 1);
    assert_eq!(stats["active_count"], 1);
    assert_eq!(stats["won_value"], "245.00");
    let win_rate: f64 = stats["win_rate"].as_str().unwrap().parse().unwrap();
    assert_eq!(win_rate, 50.0);

    let table = sb.run("quoter", ["stats"]).unwrap();
    assert_snapshot!("stats_table", table);
}

#[test]
fn test_status_rejects_bad_input() {
    let sb = Sandbox::new();
    quote(&sb, "powerpoint_install", "One");
    let before = std::fs::read_to_string(sb.default_ledger()).unwrap();

    let out = sb.output("quoter", ["status", "0", "Pending"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid status 'Pending'"));

    let out = sb.output("quoter", ["status", "5", "Won"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Position 5 is out of range"));

    let out = sb.output("quoter", ["status", "-1", "Won"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Position -1 is out of range"));

    assert_eq!(std::fs::read_to_string(sb.default_ledger()).unwrap(), before);
}

#[test]
fn test_ledger_flag_and_env_override() {
    let mut sb = Sandbox::new();
    let custom = sb.root_path().join("books/quotes.csv");
    sb.run(
        "quoter",
        ["--ledger", custom.to_str().unwrap(), "init"],
    )
    .unwrap();
    assert!(custom.exists());
    assert!(!sb.default_ledger().exists());

    sb.env("QUOTER_LEDGER", custom.to_string_lossy());
    quote(&sb, "smoke_alarm_install", "Env User");
    assert!(sb.read("books/quotes.csv").contains("Env User"));
}

#[test]
fn test_config_file_letterhead_and_catalog() {
    let mut sb = Sandbox::new();
    sb.write(
        "home/.quoter/config.toml",
        r#"
ledger = "ledger.csv"
catalog = "services.toml"

[letterhead]
company = "Sparky Bros"
"#,
    )
    .write(
        "home/.quoter/services.toml",
        r#"
[[services]]
key = "ev_charger"
name = "EV Charger Install"
price = "1450.00"
description = "Wall-mounted 7kW charger."
"#,
    );

    let doc = quote(&sb, "ev_charger", "Config User");
    assert!(doc.starts_with("⚡ SPARKY BROS"));
    assert!(doc.contains("$1450.00 AUD"));
    assert!(sb.read("home/.quoter/ledger.csv").contains("EV Charger Install,1450.00,Sent"));
    assert!(!sb.default_ledger().exists());
}

#[test]
fn test_list_on_empty_ledger() {
    let sb = Sandbox::new();
    let out = sb.run("quoter", ["list"]).unwrap();
    assert!(out.contains("No quotes recorded yet."));
    assert!(list_json(&sb, &[]).is_empty());
}

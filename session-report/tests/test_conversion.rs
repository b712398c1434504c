use serde_json::Value;
use session_report::config::{Configuration, RunOptions, ViewSet};
use session_report::conversion::{convert, run, ConversionSummary};
use session_report::domain::{ConvertError, ParseError};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn sample_config() -> Configuration {
    Configuration::load(&fixture("session-report-conf.json")).expect("Failed to load config")
}

fn sample_log() -> String {
    std::fs::read_to_string(fixture("sample_lttng.txt")).expect("Failed to read sample log")
}

fn config_from(json: &str) -> Configuration {
    Configuration::parse(json, Path::new("inline.json")).expect("Invalid inline config")
}

fn options(core_count: usize) -> RunOptions {
    let mut options = RunOptions::new("lttng.txt", "report.json");
    options.core_count = core_count;
    options
}

fn convert_str(config: &Configuration, options: &RunOptions, input: &str) -> (ConversionSummary, Value) {
    let result = convert(config, options, input.as_bytes(), Vec::new()).expect("Conversion failed");
    let doc: Value = serde_json::from_slice(&result.output).expect("Output is not valid JSON");
    (result.summary, doc)
}

fn events(doc: &Value) -> &Vec<Value> {
    doc["traceEvents"].as_array().expect("traceEvents is not an array")
}

/// Events other than `M` metadata records
fn timeline(doc: &Value) -> Vec<&Value> {
    events(doc).iter().filter(|e| e["ph"] != "M").collect()
}

fn find<'a>(doc: &'a Value, ph: &str, name: &str) -> Vec<&'a Value> {
    events(doc)
        .iter()
        .filter(|e| e["ph"] == ph && e["name"] == name)
        .collect()
}

/// `[secs.nanos]` token for a microsecond offset past 1500000010 s
fn stamp(micros: u64) -> String {
    format!("[{}.{:06}000]", 1_500_000_010 + micros / 1_000_000, micros % 1_000_000)
}

fn user_line(micros: u64, event: &str, process: &str, pid: i64, tid: i64, payload: &str) -> String {
    format!(
        "{} (+0.000001000) webos pmtrace:{event}: {{ cpu_id = 0 }}, {{ procname = \"{process}\", vpid = {pid}, vtid = {tid} }}, {{ {payload} }}\n",
        stamp(micros)
    )
}

fn kernel_line(
    micros: u64,
    cpu: u32,
    prev: &str,
    prev_tid: i64,
    next: &str,
    next_tid: i64,
) -> String {
    format!(
        "{} (+0.000001000) webos sched_switch: {{ cpu_id = {cpu} }}, {{ procname = \"{prev}\", tid = {prev_tid} }}, {{ prev_comm = \"{prev}\", prev_tid = {prev_tid}, prev_prio = 20, prev_state = 1, next_comm = \"{next}\", next_tid = {next_tid}, next_prio = 20 }}\n",
        stamp(micros)
    )
}

const USER_ONLY: &str = r#"{
    "catapultIgnoreEvents": [],
    "catapultUserView": { "enable": true },
    "catapultGroupView": { "enable": false, "groups": [] },
    "catapultCPUView": { "enable": false }
}"#;

const CPU_ONLY: &str = r#"{
    "catapultIgnoreEvents": [],
    "catapultUserView": { "enable": false },
    "catapultGroupView": { "enable": false, "groups": [] },
    "catapultCPUView": { "enable": true }
}"#;

#[test]
fn test_sample_log_summary() {
    let (summary, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    assert_eq!(summary.lines_read, 12);
    assert_eq!(summary.blank_skipped, 0);
    assert_eq!(summary.auxiliary_skipped, 1);
    assert_eq!(summary.kernel_nodes, 3);
    assert_eq!(summary.legacy_nodes, 5);
    assert_eq!(summary.structured_nodes, 3);
    assert_eq!(summary.ignored_nodes, 1);
    assert_eq!(summary.unknown_event_types, 1);
    assert_eq!(summary.cpu_samples, 1);
    assert_eq!(summary.events_written, events(&doc).len());
    assert_eq!(events(&doc).len(), 36);
    assert_eq!(doc["displayTimeUnit"], "ms");
}

#[test]
fn test_legacy_scope_events() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let begin = find(&doc, "B", "ns_Foo");
    assert_eq!(begin.len(), 1);
    let begin = begin[0];
    assert_eq!(begin["cat"], "all");
    assert_eq!(begin["pid"], 100);
    assert_eq!(begin["tid"], 101);
    assert_eq!(begin["ts"], "10000200");
    assert_eq!(begin["args"]["scope"], "ns::Foo(int)");
    assert_eq!(begin["args"]["signal"], "ns_Foo");
    assert_eq!(begin["args"]["process name"], "AppMgr");
    assert_eq!(begin["args"]["pid"], "100");
    assert_eq!(begin["args"]["cpu_id"], "0");

    let end = find(&doc, "E", "ns_Foo");
    assert_eq!(end.len(), 1);
    assert_eq!(end[0]["ts"], "10000800");
    assert_eq!(end[0]["tid"], 101);
}

#[test]
fn test_structured_events() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let frame = find(&doc, "B", "frame");
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0]["cat"], "Render");
    assert_eq!(frame[0]["pid"], 300);
    assert_eq!(frame[0]["tid"], 301);
    assert_eq!(frame[0]["args"]["count"], "3");
    assert!(frame[0]["args"].get("cat").is_none());

    // log events are named after their category
    let log = find(&doc, "I", "Boot");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["cat"], "Boot");
    assert_eq!(log[0]["args"]["step"], "done");
}

#[test]
fn test_marker_emits_async_lifetime() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let marker: Vec<&Value> = events(&doc).iter().filter(|e| e["name"] == "vsync").collect();
    let phases: Vec<&str> = marker.iter().filter_map(|e| e["ph"].as_str()).collect();
    assert_eq!(phases, vec!["N", "O", "D", "I"]);

    for event in &marker[..3] {
        assert_eq!(event["id"], 301);
        assert_eq!(event["cat"], "Render");
    }
    assert!(marker[0].get("args").is_none());
    assert_eq!(marker[1]["args"]["snapshot"]["seq"], "7");
    assert_eq!(marker[1]["args"]["snapshot"]["cat"], "Render");
    assert!(marker[2].get("args").is_none());
    assert_eq!(marker[3]["s"], "g");
    assert!(marker[3].get("id").is_none());
}

#[test]
fn test_ignored_process_has_no_user_events() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    assert!(timeline(&doc).iter().all(|e| e["pid"] != 200));
    assert!(find(&doc, "B", "Foo_run").is_empty());

    // still named in the metadata
    let names = find(&doc, "M", "process_name");
    assert!(names.iter().any(|e| e["pid"] == 200 && e["args"]["name"] == "Foo"));
}

#[test]
fn test_ignore_rule_keeps_kernel_events() {
    let config = config_from(
        r#"{
        "catapultIgnoreEvents": [{ "process": "Foo" }],
        "catapultUserView": { "enable": true },
        "catapultGroupView": { "enable": false, "groups": [] },
        "catapultCPUView": { "enable": true }
    }"#,
    );
    let input = [
        user_line(100, "before", "Foo", 200, 201, r#"scope = "Foo::run()""#),
        kernel_line(200, 0, "AppMgr", 101, "Foo", 201),
    ]
    .concat();

    let (summary, doc) = convert_str(&config, &options(1), &input);
    assert_eq!(summary.ignored_nodes, 1);
    assert!(find(&doc, "B", "Foo_run").is_empty());

    let scheduled = find(&doc, "B", "Foo");
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0]["pid"], -2);
    assert_eq!(scheduled[0]["tid"], 201);
}

#[test]
fn test_group_view_track() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let group: Vec<&Value> = timeline(&doc).into_iter().filter(|e| e["cat"] == "group").collect();
    assert_eq!(group.len(), 1);
    assert_eq!(group[0]["pid"], -3);
    assert_eq!(group[0]["tid"], 0);
    assert_eq!(group[0]["ph"], "I");
    assert_eq!(group[0]["name"], "touch");

    let processes = find(&doc, "M", "process_name");
    let custom: Vec<&&Value> = processes.iter().filter(|e| e["pid"] == -3).collect();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0]["args"]["name"], "[CUSTOM] Input");
    assert!(processes.iter().all(|e| e["args"]["name"] != "[CUSTOM] Disabled"));

    let threads = find(&doc, "M", "thread_name");
    assert!(threads.iter().any(|e| e["pid"] == -3 && e["tid"] == 0 && e["args"]["name"] == "Touch"));
    assert!(threads.iter().all(|e| e["args"]["name"] != "Never"));
}

#[test]
fn test_group_duplication_across_groups() {
    let config = config_from(
        r#"{
        "catapultIgnoreEvents": [],
        "catapultUserView": { "enable": false },
        "catapultGroupView": {
            "enable": true,
            "groups": [
                { "name": "Input", "enable": true, "catapultEvents": [
                    { "process": "AppMgr", "physical": "touch", "logical": "Touch" }
                ]},
                { "name": "Gestures", "enable": true, "catapultEvents": [
                    { "process": "AppMgr", "physical": "touch", "logical": "Tap" },
                    { "process": "AppMgr", "physical": "swipe", "logical": "Swipe" }
                ]}
            ]
        },
        "catapultCPUView": { "enable": false }
    }"#,
    );
    let input = [
        user_line(100, "message", "AppMgr", 100, 101, r#"scope = "touch""#),
        user_line(200, "message", "AppMgr", 100, 101, r#"scope = "touch""#),
    ]
    .concat();

    let (_, doc) = convert_str(&config, &options(1), &input);

    let group = timeline(&doc);
    assert_eq!(group.len(), 4);
    assert_eq!(group.iter().filter(|e| e["pid"] == -3 && e["tid"] == 0).count(), 2);
    assert_eq!(group.iter().filter(|e| e["pid"] == -4 && e["tid"] == 1).count(), 2);

    let threads = find(&doc, "M", "thread_name");
    assert_eq!(threads.iter().filter(|e| e["args"]["name"] == "Touch").count(), 1);
    assert_eq!(threads.iter().filter(|e| e["args"]["name"] == "Tap").count(), 1);
    assert!(threads.iter().all(|e| e["args"]["name"] != "Swipe"));
}

#[test]
fn test_cpu_process_view() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let begin = find(&doc, "B", "AppMgr");
    assert_eq!(begin.len(), 1);
    assert_eq!(begin[0]["pid"], -2);
    assert_eq!(begin[0]["tid"], 101);
    assert_eq!(begin[0]["ts"], "10000100");
    assert_eq!(begin[0]["args"]["cpu_id"], "0");

    let end = find(&doc, "E", "AppMgr");
    assert_eq!(end.len(), 1);
    assert_eq!(end[0]["ts"], "10005100");

    let compositor = find(&doc, "B", "Compositor");
    assert_eq!(compositor.len(), 1);
    assert_eq!(compositor[0]["tid"], 301);

    // idle threads never reach the timeline
    assert!(timeline(&doc)
        .iter()
        .all(|e| !e["name"].as_str().unwrap_or_default().starts_with("swapper")));

    let threads = find(&doc, "M", "thread_name");
    assert!(threads
        .iter()
        .any(|e| e["pid"] == -2 && e["tid"] == 301 && e["args"]["name"] == "Compositor(301)"));
}

#[test]
fn test_swapper_switch_emits_only_begin() {
    let config = config_from(CPU_ONLY);
    let input = kernel_line(100, 2, "swapper/2", 0, "AppMgr", 55);

    let (_, doc) = convert_str(&config, &options(4), &input);

    let timeline: Vec<&Value> = timeline(&doc).into_iter().filter(|e| e["cat"] == "cpu").collect();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0]["ph"], "B");
    assert_eq!(timeline[0]["name"], "AppMgr");
    assert_eq!(timeline[0]["pid"], -2);
    assert_eq!(timeline[0]["tid"], 55);
    assert!(find(&doc, "E", "swapper/2").is_empty());
}

#[test]
fn test_cpu_usage_counters() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let samples: Vec<&Value> = timeline(&doc)
        .into_iter()
        .filter(|e| e["ph"] == "C" && e["ts"] != "10020100")
        .collect();
    assert_eq!(samples.len(), 3);
    for sample in &samples {
        assert_eq!(sample["pid"], -1);
        assert_eq!(sample["ts"], "10010100");
        assert_eq!(sample["cat"], "usage");
    }
    assert_eq!(samples[0]["name"], "Core #0");
    assert_eq!(samples[0]["tid"], 0);
    assert_eq!(samples[0]["args"]["value"], 50.0);
    assert_eq!(samples[1]["name"], "Core #1");
    assert_eq!(samples[1]["args"]["value"], 0.0);
    assert_eq!(samples[2]["name"], "Total");
    assert_eq!(samples[2]["tid"], 2);
    assert_eq!(samples[2]["args"]["value"], 25.0);

    // fixed-scale reference counters at the final window end
    let reference: Vec<&Value> = events(&doc)
        .iter()
        .filter(|e| e["ph"] == "C" && e["ts"] == "10020100")
        .collect();
    assert_eq!(reference.len(), 3);
    assert!(reference.iter().all(|e| e["args"]["value"] == 100.0));
}

#[test]
fn test_cpu_usage_stays_in_range() {
    let config = config_from(CPU_ONLY);
    let mut input = String::new();
    let mut running = [0i64, 0];
    for i in 0..60u64 {
        let cpu = usize::try_from(i % 2).unwrap();
        let next = 1000 + i64::try_from(i).unwrap();
        let prev = running[cpu];
        let prev_name = if prev == 0 { format!("swapper/{cpu}") } else { format!("worker{prev}") };
        input.push_str(&kernel_line(
            i * 3_700,
            u32::try_from(cpu).unwrap(),
            &prev_name,
            prev,
            &format!("worker{next}"),
            next,
        ));
        running[cpu] = next;
    }

    let (summary, doc) = convert_str(&config, &options(2), &input);
    assert!(summary.cpu_samples > 0);

    for sample in timeline(&doc).into_iter().filter(|e| e["ph"] == "C") {
        let value = sample["args"]["value"].as_f64().expect("counter value is a number");
        assert!((0.0..=100.0).contains(&value), "{sample}");
    }
}

#[test]
fn test_user_payload_mentioning_sched_switch() {
    let line = user_line(100, "message", "App", 10, 11, r#"text = "sched_switch storm", level = 2"#);

    let all_views = config_from(
        r#"{
        "catapultIgnoreEvents": [],
        "catapultUserView": { "enable": true },
        "catapultGroupView": { "enable": false, "groups": [] },
        "catapultCPUView": { "enable": true }
    }"#,
    );
    for config in [all_views, config_from(USER_ONLY)] {
        let (summary, doc) = convert_str(&config, &options(1), &line);
        assert_eq!(summary.kernel_nodes, 0);
        assert_eq!(summary.legacy_nodes, 1);
        assert_eq!(summary.rerouted_user_lines, 1);

        let instant = find(&doc, "I", "message");
        assert_eq!(instant.len(), 1);
        assert_eq!(instant[0]["pid"], 10);
        assert_eq!(instant[0]["args"]["text"], "sched_switch storm");
        assert!(timeline(&doc).iter().all(|e| e["cat"] != "cpu"));
    }
}

#[test]
fn test_user_view_phases() {
    let config = config_from(USER_ONLY);
    let input = [
        user_line(100, "scope_entry", "App", 10, 11, r#"scope = "ns::Load()""#),
        user_line(200, "function_entry", "App", 10, 11, r#"scope = "ns::Parse()""#),
        user_line(300, "function_exit", "App", 10, 11, r#"scope = "ns::Parse()""#),
        user_line(400, "scope_exit", "App", 10, 11, r#"scope = "ns::Load()""#),
        user_line(500, "start", "App", 10, 11, r#"scope = "ns::Ignored()""#),
        user_line(600, "keyValue", "App", 10, 11, "key = 1, value = 2"),
    ]
    .concat();

    let (_, doc) = convert_str(&config, &options(1), &input);
    let phases: Vec<(&str, &str)> = timeline(&doc)
        .iter()
        .map(|e| (e["ph"].as_str().unwrap_or_default(), e["name"].as_str().unwrap_or_default()))
        .collect();
    assert_eq!(
        phases,
        vec![
            ("B", "ns_Load"),
            ("B", "ns_Parse"),
            ("E", "ns_Parse"),
            ("E", "ns_Load"),
            ("I", "keyValue"),
        ]
    );

    let key_value = find(&doc, "I", "keyValue");
    assert_eq!(key_value[0]["args"]["key"], "1");
    assert_eq!(key_value[0]["args"]["value"], "2");
}

#[test]
fn test_unknown_and_cross_dialect_types() {
    let config = config_from(USER_ONLY);
    let input = [
        user_line(100, "perflog", "App", 10, 11, "a = 1"),
        user_line(200, "log", "App", 10, 11, "a = 1"),
        user_line(300, "message", "App", 10, 11, r#"scope = "hello""#),
    ]
    .concat();

    let (summary, doc) = convert_str(&config, &options(1), &input);
    assert_eq!(summary.unknown_event_types, 2);
    assert_eq!(timeline(&doc).len(), 1);
    assert_eq!(find(&doc, "I", "hello").len(), 1);
}

#[test]
fn test_process_filter() {
    let mut options = options(2);
    options.processes = Some(vec!["Compositor".to_string()]);
    let (_, doc) = convert_str(&sample_config(), &options, &sample_log());

    let timeline = timeline(&doc);
    assert!(timeline.iter().all(|e| e["pid"] != 100));
    assert!(find(&doc, "B", "AppMgr").is_empty());
    assert_eq!(find(&doc, "B", "frame").len(), 1);
    assert_eq!(find(&doc, "B", "Compositor").len(), 1);
    assert_eq!(timeline.iter().filter(|e| e["ph"] == "C" && e["ts"] == "10010100").count(), 3);
}

#[test]
fn test_view_override() {
    let mut options = options(2);
    options.views = Some(ViewSet { user: false, group: false, cpu: true });
    let (_, doc) = convert_str(&sample_config(), &options, &sample_log());

    assert!(!events(&doc).is_empty());
    assert!(events(&doc).iter().all(|e| e["pid"].as_i64().unwrap_or_default() < 0));
    assert!(events(&doc).iter().all(|e| e["pid"] != -3));
}

#[test]
fn test_no_active_view() {
    let mut no_views = options(1);
    no_views.views = Some(ViewSet::default());
    let result = convert(&sample_config(), &no_views, sample_log().as_bytes(), Vec::new());
    assert!(matches!(result, Err(ConvertError::NoActiveView)));

    let config = config_from(
        r#"{
        "catapultIgnoreEvents": [],
        "catapultUserView": { "enable": false },
        "catapultGroupView": { "enable": false, "groups": [] },
        "catapultCPUView": { "enable": false }
    }"#,
    );
    let result = convert(&config, &options(1), "".as_bytes(), Vec::new());
    assert!(matches!(result, Err(ConvertError::NoActiveView)));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let config = config_from(USER_ONLY);
    let input = [
        user_line(100, "message", "App", 10, 11, r#"scope = "ok""#),
        "[garbage] x y\n".to_string(),
    ]
    .concat();

    let result = convert(&config, &options(1), input.as_bytes(), Vec::new());
    match result {
        Err(ConvertError::MalformedLine { line, source }) => {
            assert_eq!(line, 2);
            assert!(matches!(source, ParseError::TooFewTokens { .. }));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("malformed line was accepted"),
    }

    let bad_timestamp = user_line(100, "message", "App", 10, 11, r#"scope = "ok""#)
        .replacen("[1500000010.000100000]", "[15000x0010.000100000]", 1);
    let result = convert(&config, &options(1), bad_timestamp.as_bytes(), Vec::new());
    assert!(matches!(
        result,
        Err(ConvertError::MalformedLine { line: 1, source: ParseError::BadTimestamp(_) })
    ));
}

#[test]
fn test_blank_lines_are_skipped() {
    let config = config_from(USER_ONLY);
    let input = format!(
        "\n{}   \n\r\n",
        user_line(100, "message", "App", 10, 11, r#"scope = "ok""#)
    );

    let (summary, doc) = convert_str(&config, &options(1), &input);
    assert_eq!(summary.lines_read, 4);
    assert_eq!(summary.blank_skipped, 3);
    assert_eq!(timeline(&doc).len(), 1);
}

#[test]
fn test_empty_input_is_valid_document() {
    let config = config_from(USER_ONLY);
    let result = convert(&config, &options(1), "".as_bytes(), Vec::new()).expect("Conversion failed");

    let text = String::from_utf8(result.output).expect("Invalid UTF-8");
    assert_eq!(text, "{\"displayTimeUnit\":\"ms\",\"traceEvents\":[\n]}\n");
    let doc: Value = serde_json::from_str(&text).expect("Invalid JSON");
    assert!(events(&doc).is_empty());
}

#[test]
fn test_document_layout() {
    let result = convert(&sample_config(), &options(2), sample_log().as_bytes(), Vec::new())
        .expect("Conversion failed");
    let text = String::from_utf8(result.output).expect("Invalid UTF-8");

    assert!(text.starts_with("{\"displayTimeUnit\":\"ms\",\"traceEvents\":[\n{"));
    assert!(text.ends_with("}\n]}\n"));
    assert!(!text.contains(",\n]"));
    assert_eq!(text.lines().count(), 36 + 2);
}

#[test]
fn test_timestamps_follow_input_order() {
    let (_, doc) = convert_str(&sample_config(), &options(2), &sample_log());

    let stamps: Vec<u64> = timeline(&doc)
        .iter()
        .map(|e| e["ts"].as_str().and_then(|ts| ts.parse().ok()).expect("ts is a decimal string"))
        .collect();
    assert!(!stamps.is_empty());
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]), "{stamps:?}");
}

#[test]
fn test_conversion_is_deterministic() {
    let config = sample_config();
    let log = sample_log();
    let first = convert(&config, &options(2), log.as_bytes(), Vec::new()).expect("Conversion failed");
    let second = convert(&config, &options(2), log.as_bytes(), Vec::new()).expect("Conversion failed");
    assert_eq!(first.output, second.output);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn test_run_writes_report_and_dumps() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("lttng.txt");
    let output = dir.path().join("report.json");
    std::fs::copy(fixture("sample_lttng.txt"), &input).expect("Failed to copy sample log");

    let mut options = RunOptions::new(&input, &output);
    options.core_count = 2;
    options.retain_nodes = true;

    let summary = run(&sample_config(), &options).expect("Run failed");
    assert_eq!(summary.events_written, 36);

    let report = std::fs::read_to_string(&output).expect("Report not written");
    let doc: Value = serde_json::from_str(&report).expect("Invalid JSON");
    assert_eq!(events(&doc).len(), 36);

    for suffix in ["user.dat", "user.new.dat", "kernel.dat", "meta.pid", "meta.tid", "meta.tidpid", "group.info"] {
        let path = dir.path().join(format!("session-report.{suffix}"));
        assert!(path.exists(), "missing dump {}", path.display());
    }
    let pids = std::fs::read_to_string(dir.path().join("session-report.meta.pid")).unwrap();
    assert!(pids.contains("pid : 300, procname : Compositor"));
}

#[test]
fn test_run_missing_input() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let options = RunOptions::new(dir.path().join("absent.txt"), dir.path().join("report.json"));
    let result = run(&sample_config(), &options);
    assert!(matches!(result, Err(ConvertError::Io(_))));
}

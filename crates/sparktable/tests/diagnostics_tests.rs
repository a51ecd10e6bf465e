use log::{Level, LevelFilter, Metadata, Record};
use sparktable::{classify, ColumnDescriptor, ColumnRole, MultiRolePolicy};
use std::sync::Mutex;

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn install() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Debug);
}

fn warnings_mentioning(needle: &str) -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == Level::Warn && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}

#[test]
fn multi_role_columns_emit_a_warning_under_either_policy() {
    install();
    let columns = vec![
        ColumnDescriptor::new("t.kept", "Kept")
            .with_role(ColumnRole::Value)
            .with_role(ColumnRole::SparklineSeries),
        ColumnDescriptor::new("t.narrowed", "Narrowed")
            .with_role(ColumnRole::Category)
            .with_role(ColumnRole::XAxis)
            .with_index(1),
        ColumnDescriptor::new("t.plain", "Plain")
            .with_role(ColumnRole::Value)
            .with_index(2),
    ];

    let keep_all = classify(&columns[..1], MultiRolePolicy::KeepAll);
    assert_eq!(keep_all.value.len(), 1);
    assert_eq!(keep_all.sparkline_series.len(), 1);
    let kept = warnings_mentioning("t.kept");
    assert_eq!(kept.len(), 1);
    assert!(kept[0].contains("value, sparklineSeries"));

    let first_wins = classify(&columns[1..], MultiRolePolicy::FirstWins);
    assert_eq!(first_wins.category.len(), 1);
    assert!(first_wins.x_axis.is_empty());
    let narrowed = warnings_mentioning("t.narrowed");
    assert_eq!(narrowed.len(), 1);
    assert!(narrowed[0].contains("keeping category"));

    assert!(warnings_mentioning("t.plain").is_empty());
}

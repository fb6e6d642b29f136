use chanflow::{Options, DEFAULT_WORK_SIZE};
use tokio_util::sync::CancellationToken;

#[test]
fn test_default_options() {
    let options = Options::default();
    assert_eq!(options.work_size, 0);
    assert_eq!(options.work_size(), DEFAULT_WORK_SIZE);
    assert_eq!(DEFAULT_WORK_SIZE, 10_000);
    assert!(options.cancellation().is_none());
}

#[test]
fn test_with_pool_size() {
    assert_eq!(Options::new().with_pool_size(1).work_size(), 1);
    assert_eq!(Options::new().with_pool_size(64).work_size(), 64);
    assert_eq!(Options::new().with_pool_size(0).work_size(), DEFAULT_WORK_SIZE);
}

#[test]
fn test_huge_pool_size_is_clamped() {
    let size = Options::new().with_pool_size(usize::MAX).work_size();
    assert!(size > DEFAULT_WORK_SIZE);
    assert!(size <= u32::MAX as usize);
}

#[test]
fn test_with_cancellation() {
    let token = CancellationToken::new();
    let options = Options::new().with_cancellation(token.clone());

    token.cancel();
    assert!(options.cancellation().map(|t| t.is_cancelled()).unwrap_or(false));
}

#[test]
fn test_from_json() {
    let options = Options::from_json(r#"{"work_size": 16}"#).unwrap();
    assert_eq!(options.work_size(), 16);

    let options = Options::from_json("{}").unwrap();
    assert_eq!(options.work_size(), DEFAULT_WORK_SIZE);
}

#[test]
fn test_from_json_rejects_bad_input() {
    assert!(Options::from_json("not json").is_err());
    assert!(Options::from_json(r#"{"work_size": -1}"#).is_err());
}

#[test]
fn test_options_serialize_without_token() {
    let options = Options::new()
        .with_pool_size(4)
        .with_cancellation(CancellationToken::new());
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(json, r#"{"work_size":4}"#);
}

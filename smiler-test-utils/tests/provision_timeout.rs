use std::time::Duration;

use smiler_test_utils::prelude::*;

#[tokio::test]
async fn provisioning_past_budget_fails_fatally() {
    let settings = TestSettings::for_tests().provision_timeout(Duration::from_nanos(1));

    let result = provision(settings).await;

    assert!(matches!(
        result,
        Err(TestError::Timeout {
            stage: "provision",
            ..
        })
    ));

    // A timed out attempt still counts as the process' one provisioning
    let retry = provision(TestSettings::for_tests()).await;
    assert!(matches!(retry, Err(TestError::AlreadyProvisioned)));
}

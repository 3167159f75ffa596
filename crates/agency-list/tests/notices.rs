use agency_backend::ErrorKind;
use agency_list::{
    Connectivity, ConnectivityMonitor, ControllerContext, ListController, ListOptions,
    ListSource, Notice, Notifier,
};
use agency_model::Job;
use agency_test_utils::{jobs_scenario, permission_denied, transient, ScriptedClient};
use mockall::mock;
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub Notifier {}

    impl Notifier for Notifier {
        fn notify(&self, notice: Notice);
    }
}

fn controller(
    client: ScriptedClient,
    context: ControllerContext,
    notifier: MockNotifier,
) -> ListController<Job> {
    ListController::new(
        client,
        ListSource::<Job>::resource(),
        ListOptions::new(),
        context.with_notifier(Arc::new(notifier)),
    )
}

#[tokio::test(start_paused = true)]
async fn slow_connection_is_announced_once_per_load() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|notice| matches!(notice, Notice::SlowConnection { resource } if resource == "jobs"))
        .times(1)
        .return_const(());
    let client = ScriptedClient::new()
        .then_err(transient())
        .then_ok(jobs_scenario())
        .with_delay(Duration::from_secs(6));

    let controller = controller(client, ControllerContext::admin(), notifier);

    assert!(!controller.load().await.is_error());
}

#[tokio::test(start_paused = true)]
async fn permission_failure_is_reported() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|notice| {
            matches!(
                notice,
                Notice::LoadFailed { kind: ErrorKind::PermissionDenied, .. }
            )
        })
        .times(1)
        .return_const(());

    let controller = controller(
        ScriptedClient::new().then_err(permission_denied()),
        ControllerContext::admin(),
        notifier,
    );

    controller.load().await;
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_report_once() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|notice| matches!(notice, Notice::LoadFailed { kind: ErrorKind::Transient, .. }))
        .times(1)
        .return_const(());

    let controller = controller(
        ScriptedClient::new().otherwise(Err(transient())),
        ControllerContext::admin(),
        notifier,
    );

    controller.load().await;
}

#[tokio::test(start_paused = true)]
async fn offline_failure_is_reported_as_offline() {
    let monitor = ConnectivityMonitor::new();
    monitor.set(Connectivity::Offline);
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|notice| matches!(notice, Notice::Offline { .. }))
        .times(1)
        .return_const(());

    let controller = controller(
        ScriptedClient::new().then_err(transient()),
        ControllerContext::admin().with_connectivity(monitor.subscribe()),
        notifier,
    );

    controller.load().await;
}

#[tokio::test(start_paused = true)]
async fn disposed_controller_stays_silent() {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().never();

    let controller = controller(
        ScriptedClient::new().otherwise(Err(permission_denied())),
        ControllerContext::admin(),
        notifier,
    );
    controller.dispose();

    controller.load().await;
    assert!(controller.is_disposed());
}

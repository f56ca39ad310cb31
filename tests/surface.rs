use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::future::BoxFuture;
use serde_json::{json, Value};
use tokio::time::sleep;

use countdown_overlay::{
    state::Phase, DisplaySurface, Snapshot, SoundError, SoundPlayer, SoundRequest, SurfaceConfig,
    SurfaceHandle, TimeLeft,
};

#[derive(Default)]
struct RecordingPlayer {
    requests: Mutex<Vec<SoundRequest>>,
    fail: bool,
}

impl SoundPlayer for RecordingPlayer {
    fn play(&self, request: SoundRequest) -> BoxFuture<'static, Result<(), SoundError>> {
        let asset = request.asset.clone();
        self.requests.lock().expect("requests lock").push(request);
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(SoundError::MissingAsset(asset))
            } else {
                Ok(())
            }
        })
    }
}

fn start() -> SurfaceHandle {
    DisplaySurface::start(SurfaceConfig::default(), Arc::new(RecordingPlayer::default()))
}

async fn send(surface: &SurfaceHandle, events: &[Value]) -> Snapshot {
    for event in events {
        surface.post(event.clone()).expect("post event");
    }
    surface.flush().await.expect("flush");
    surface.snapshot()
}

fn show(id: &str, duration: u64) -> Value {
    json!({ "action": "show", "displayId": id, "duration": duration })
}

#[tokio::test(start_paused = true)]
async fn show_is_listed_immediately_then_fades_in() {
    let surface = start();

    let snapshot = send(&surface, &[show("a", 90)]).await;
    assert_eq!(snapshot.display_ids(), vec!["a"]);
    let timer = snapshot.get("a").expect("timer a");
    assert_eq!(timer.time_left_formatted, "01:30");
    assert_eq!(timer.title, "Countdown");
    assert_eq!(timer.opacity, 0.0);

    sleep(Duration::from_millis(17)).await;
    surface.flush().await.expect("flush");

    let timer = surface.snapshot().get("a").cloned().expect("timer a");
    assert_eq!(timer.opacity, 1.0);
    assert_eq!(timer.phase, Phase::Visible);

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn update_for_unknown_timer_creates_nothing() {
    let surface = start();

    let snapshot = send(
        &surface,
        &[json!({ "action": "update", "displayId": "unknown", "timeLeft": 10 })],
    )
    .await;

    assert!(snapshot.timers.is_empty());
    assert_eq!(snapshot.revision, 0);
    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn explicit_flash_false_clears_flashing() {
    let surface = start();

    send(
        &surface,
        &[
            show("a", 90),
            json!({ "action": "update", "displayId": "a", "timeLeft": 5, "flash": true }),
        ],
    )
    .await;
    assert!(surface.snapshot().get("a").expect("timer a").is_flashing);

    let snapshot = send(
        &surface,
        &[json!({ "action": "update", "displayId": "a", "timeLeft": 4, "flash": false })],
    )
    .await;

    let timer = snapshot.get("a").expect("timer a");
    assert!(!timer.is_flashing);
    assert_eq!(timer.time_left_formatted, "00:04");
    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn hide_keeps_timer_transparent_until_fade_window_ends() {
    let surface = start();
    send(&surface, &[show("a", 90)]).await;
    sleep(Duration::from_millis(20)).await;

    let snapshot = send(
        &surface,
        &[json!({ "action": "hide", "displayId": "a", "fadeOut": 100 })],
    )
    .await;
    let timer = snapshot.get("a").expect("timer a");
    assert_eq!(timer.opacity, 0.0);
    assert_eq!(timer.phase, Phase::Retiring);

    sleep(Duration::from_millis(99)).await;
    surface.flush().await.expect("flush");
    assert!(surface.snapshot().get("a").is_some());

    sleep(Duration::from_millis(2)).await;
    surface.flush().await.expect("flush");
    assert!(surface.snapshot().timers.is_empty());

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn hide_without_fade_out_uses_default_window() {
    let surface = start();
    send(
        &surface,
        &[show("a", 90), json!({ "action": "hideTimer", "displayId": "a" })],
    )
    .await;

    sleep(Duration::from_millis(499)).await;
    surface.flush().await.expect("flush");
    assert!(surface.snapshot().get("a").is_some());

    sleep(Duration::from_millis(2)).await;
    surface.flush().await.expect("flush");
    assert!(surface.snapshot().get("a").is_none());

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn recreated_timer_survives_stale_removal() {
    let surface = start();
    send(
        &surface,
        &[
            show("a", 90),
            json!({ "action": "hide", "displayId": "a", "fadeOut": 100 }),
        ],
    )
    .await;

    sleep(Duration::from_millis(50)).await;
    send(&surface, &[show("a", 50)]).await;

    sleep(Duration::from_millis(51)).await;
    surface.flush().await.expect("flush");

    let snapshot = surface.snapshot();
    let timer = snapshot.get("a").expect("recreated timer a");
    assert_eq!(timer.time_left, TimeLeft::Seconds(50));
    assert_eq!(timer.time_left_formatted, "00:50");
    assert_eq!(timer.opacity, 1.0);

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn hide_before_first_frame_is_not_undone_by_fade_in() {
    let surface = start();
    send(
        &surface,
        &[
            show("a", 90),
            json!({ "action": "hide", "displayId": "a", "fadeOut": 200 }),
        ],
    )
    .await;

    sleep(Duration::from_millis(50)).await;
    surface.flush().await.expect("flush");

    let timer = surface.snapshot().get("a").cloned().expect("timer a");
    assert_eq!(timer.opacity, 0.0);
    assert_eq!(timer.phase, Phase::Retiring);

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn recreation_does_not_reorder() {
    let surface = start();

    let snapshot = send(&surface, &[show("a", 1), show("b", 2), show("a", 3)]).await;

    assert_eq!(snapshot.display_ids(), vec!["a", "b"]);
    assert_eq!(
        snapshot.get("a").map(|t| t.time_left),
        Some(TimeLeft::Seconds(3))
    );
    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn malformed_events_leave_state_untouched() {
    let surface = start();
    send(&surface, &[show("a", 90)]).await;
    let before = surface.snapshot();

    let after = send(
        &surface,
        &[
            json!(null),
            json!("show"),
            json!({ "displayId": "a", "timeLeft": 1 }),
            json!({ "action": "selfDestruct", "displayId": "a" }),
            json!({ "action": "update", "timeLeft": 1 }),
        ],
    )
    .await;

    assert_eq!(after.revision, before.revision);
    assert_eq!(after.timers, before.timers);
    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn invalid_time_values_render_fallback() {
    let surface = start();

    let snapshot = send(
        &surface,
        &[
            json!({ "action": "show", "displayId": "neg", "duration": -1 }),
            json!({ "action": "show", "displayId": "text", "duration": "soon" }),
            json!({ "action": "show", "displayId": "missing" }),
        ],
    )
    .await;

    for id in ["neg", "text", "missing"] {
        let timer = snapshot.get(id).expect("timer");
        assert_eq!(timer.time_left, TimeLeft::Invalid, "{}", id);
        assert_eq!(timer.time_left_formatted, "00:00", "{}", id);
    }
    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn play_sound_reaches_player_without_touching_timers() {
    let player = Arc::new(RecordingPlayer::default());
    let surface = DisplaySurface::start(SurfaceConfig::default(), player.clone());
    send(&surface, &[show("a", 90)]).await;
    let before = surface.snapshot();

    send(
        &surface,
        &[
            json!({ "action": "playSound", "volume": 0.8 }),
            json!({ "action": "playSound" }),
            json!({ "action": "playSound", "volume": 3 }),
        ],
    )
    .await;

    let volumes: Vec<f64> = player
        .requests
        .lock()
        .expect("requests lock")
        .iter()
        .map(|request| request.volume)
        .collect();
    assert_eq!(volumes, vec![0.8, 0.5, 1.0]);
    assert_eq!(surface.snapshot().revision, before.revision);

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn failing_player_does_not_stop_the_surface() {
    let player = Arc::new(RecordingPlayer {
        fail: true,
        ..RecordingPlayer::default()
    });
    let surface = DisplaySurface::start(SurfaceConfig::default(), player);

    send(&surface, &[json!({ "action": "playSound" })]).await;
    sleep(Duration::from_millis(1)).await;

    let snapshot = send(&surface, &[show("a", 61)]).await;
    assert_eq!(
        snapshot.get("a").map(|t| t.time_left_formatted.as_str()),
        Some("01:01")
    );
    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_each_mutation() {
    let surface = start();
    let mut snapshots = surface.subscribe();

    surface.post(show("a", 10)).expect("post");
    snapshots.changed().await.expect("snapshot after show");
    assert_eq!(snapshots.borrow_and_update().display_ids(), vec!["a"]);

    surface
        .post(json!({ "action": "update", "displayId": "a", "timeLeft": 9 }))
        .expect("post");
    snapshots.changed().await.expect("snapshot after update");
    let snapshot = snapshots.borrow_and_update().clone();
    assert_eq!(
        snapshot.get("a").map(|t| t.time_left_formatted.as_str()),
        Some("00:09")
    );

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_snapshot_channel() {
    let surface = start();
    let probe = surface.subscribe();
    surface.shutdown().await.expect("shutdown");

    assert!(probe.has_changed().is_err());
}

#[tokio::test(start_paused = true)]
async fn falsy_flash_values_clear_flashing() {
    let surface = start();
    send(
        &surface,
        &[
            show("a", 90),
            json!({ "action": "update", "displayId": "a", "timeLeft": 5, "flash": true }),
        ],
    )
    .await;

    for falsy in [json!(0), Value::Null, json!("")] {
        let snapshot = send(
            &surface,
            &[
                json!({ "action": "update", "displayId": "a", "timeLeft": 4, "flash": true }),
                json!({
                    "action": "update", "displayId": "a", "timeLeft": 3, "flash": falsy.clone()
                }),
            ],
        )
        .await;
        assert!(!snapshot.get("a").expect("timer a").is_flashing, "{}", falsy);
    }

    let snapshot = send(
        &surface,
        &[json!({ "action": "update", "displayId": "a", "timeLeft": 2, "flash": 1 })],
    )
    .await;
    assert!(snapshot.get("a").expect("timer a").is_flashing);

    surface.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn zero_fade_out_removes_on_next_turn() {
    let surface = start();
    send(&surface, &[show("a", 90)]).await;

    let snapshot = send(
        &surface,
        &[json!({ "action": "hide", "displayId": "a", "fadeOut": 0 })],
    )
    .await;
    assert_eq!(
        snapshot.get("a").map(|t| t.phase),
        Some(Phase::Retiring)
    );

    sleep(Duration::from_millis(1)).await;
    surface.flush().await.expect("flush");
    assert!(surface.snapshot().get("a").is_none());

    surface.shutdown().await.expect("shutdown");
}

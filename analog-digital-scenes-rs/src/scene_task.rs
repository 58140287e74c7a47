//! Periodic frame loop.
//!
//! [`scene_task`] renders the currently selected [`SceneKind`] once per
//! frame at [`SceneConfig::frame_rate_hz`]. The selection lives behind an
//! `embassy-sync` mutex so another task (a button, a sensor) can switch
//! scenes at any time.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use rand::RngCore;

use crate::config::SceneConfig;
use crate::scene::{SceneKind, Scenes};
use crate::surface::MatrixSurface;

/// Frame loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Embassy
/// tasks cannot be generic, so callers wrap it in a thin concrete task:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn matrix_task(
///     panel: MyPanel,
///     rng: SmallRng,
///     selected: &'static Mutex<CriticalSectionRawMutex, SceneKind>,
/// ) {
///     scene_task(panel, rng, selected, SceneConfig::default()).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Validate `config`.
/// 2. Build both scenes for the surface size.
/// 3. Every frame period:
///    - copy the selected scene out of the mutex and release it;
///    - render and present one frame of that scene.
///
/// # Errors
///
/// * Invalid configuration: logs the error and **returns** (task exits).
/// * Render / present failure: logs the error and continues with the next
///   frame.
#[allow(clippy::needless_pass_by_value)] // config is small and consumed
pub async fn scene_task<S, R>(
    mut surface: S,
    mut rng: R,
    selected: &'static Mutex<CriticalSectionRawMutex, SceneKind>,
    config: SceneConfig,
) where
    S: MatrixSurface,
    R: RngCore,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = config.validate() {
        #[cfg(feature = "defmt")]
        defmt::warn!("scene config rejected: {}", _e);
        return;
    }

    let mut scenes = Scenes::new(&config, surface.size(), &mut rng);
    let mut ticker = Ticker::every(Duration::from_millis(config.frame_period_ms()));
    let mut shown: Option<SceneKind> = None;

    #[cfg(feature = "defmt")]
    defmt::info!("scene loop running at {} Hz", config.frame_rate_hz);

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        let kind = *selected.lock().await;

        if shown != Some(kind) {
            #[cfg(feature = "defmt")]
            defmt::info!("showing {} scene", kind);
            shown = Some(kind);
        }

        if scenes.render_frame(kind, &mut surface, &mut rng).is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("Frame render failed");
        }

        ticker.next().await;
    }
}

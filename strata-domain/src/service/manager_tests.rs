//! End-to-end scenarios driven through the service facade, mirroring the
//! behavior contracts of the window-control and state-reporting
//! protocols: stacking bands, transient chains, selective compositing,
//! visibility notifications, and orientation handling.

use pretty_assertions::assert_eq;

use strata_core::types::{OrientationAngle, RectInt};

use super::manager::{DefaultWindowManagerService, WindowManagerService};
use super::types::{CreateWindowSpec, PropertyChange};
use crate::compositing::RenderMode;
use crate::events::EngineEvent;
use crate::registry::{
    OpaqueOverride, StackPlacement, StackRequest, WindowHandle, WindowType,
};
use crate::visibility::Visibility;

const SCREEN: RectInt = RectInt::new(0, 0, 864, 480);

fn service() -> DefaultWindowManagerService {
    DefaultWindowManagerService::new(SCREEN)
}

async fn show(
    service: &DefaultWindowManagerService,
    window_type: WindowType,
    configure: impl FnOnce(&mut CreateWindowSpec),
) -> WindowHandle {
    let mut spec = CreateWindowSpec::new(window_type, SCREEN);
    configure(&mut spec);
    let handle = service.create_window(spec).await.unwrap();
    service.map_window(handle).await.unwrap();
    handle
}

async fn order(service: &DefaultWindowManagerService) -> Vec<WindowHandle> {
    service.snapshot().await.order()
}

async fn render_mode(service: &DefaultWindowManagerService, handle: WindowHandle) -> RenderMode {
    service
        .snapshot()
        .await
        .row(handle)
        .and_then(|r| r.render_mode)
        .expect("window has no render mode")
}

async fn visibility(service: &DefaultWindowManagerService, handle: WindowHandle) -> Visibility {
    service
        .snapshot()
        .await
        .row(handle)
        .and_then(|r| r.visibility)
        .expect("window has no visibility")
}

#[tokio::test]
async fn system_modal_dialog_cannot_be_activated_over() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let app = show(&service, WindowType::Application, |_| {}).await;
    let modal = show(&service, WindowType::Dialog, |s| s.modal = true).await;
    assert_eq!(order(&service).await, vec![modal, app, home]);

    // Activating the app in the background must not raise it above the
    // system-modal dialog.
    service.activate_window(app).await.unwrap();
    assert_eq!(order(&service).await, vec![modal, app, home]);

    // A plain system dialog also stays below the system-modal one.
    let dialog = show(&service, WindowType::Dialog, |_| {}).await;
    assert_eq!(order(&service).await, vec![modal, dialog, app, home]);

    // But a dialog transient to the system-modal dialog rides above it.
    let child = show(&service, WindowType::Dialog, |s| {
        s.transient_for = Some(modal)
    })
    .await;
    assert_eq!(order(&service).await, vec![child, modal, dialog, app, home]);
}

#[tokio::test]
async fn transient_dialog_is_raised_and_lowered_with_its_application() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let app = show(&service, WindowType::Application, |_| {}).await;
    let dialog1 = show(&service, WindowType::Dialog, |s| {
        s.transient_for = Some(app)
    })
    .await;
    assert_eq!(order(&service).await, vec![dialog1, app, home]);

    // Iconifying the application demotes the whole chain below the
    // desktop, preserving its internal order.
    service.iconify_window(app).await.unwrap();
    assert_eq!(order(&service).await, vec![home, dialog1, app]);

    service.activate_window(app).await.unwrap();
    assert_eq!(order(&service).await, vec![dialog1, app, home]);

    // Activating the transient raises the owner too.
    service.iconify_window(app).await.unwrap();
    service.activate_window(dialog1).await.unwrap();
    assert_eq!(order(&service).await, vec![dialog1, app, home]);

    // A second-level transient joins the chain.
    let dialog2 = show(&service, WindowType::Dialog, |s| {
        s.transient_for = Some(dialog1)
    })
    .await;
    assert_eq!(order(&service).await, vec![dialog2, dialog1, app, home]);

    service.iconify_window(app).await.unwrap();
    assert_eq!(order(&service).await, vec![home, dialog2, dialog1, app]);
    service.activate_window(app).await.unwrap();
    assert_eq!(order(&service).await, vec![dialog2, dialog1, app, home]);
}

#[tokio::test]
async fn swapping_transiencies_converges_after_cycle_break() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let app = show(&service, WindowType::Application, |_| {}).await;
    let dialog1 = show(&service, WindowType::Dialog, |s| {
        s.transient_for = Some(app)
    })
    .await;
    let dialog2 = show(&service, WindowType::Dialog, |s| {
        s.transient_for = Some(dialog1)
    })
    .await;
    assert_eq!(order(&service).await, vec![dialog2, dialog1, app, home]);

    // Swap the transiencies. The first request momentarily contradicts
    // the existing edge; the newest edge wins, so the pair converges to
    // a stable order instead of looping.
    service
        .set_transient_for(dialog1, Some(dialog2))
        .await
        .unwrap();
    service.set_transient_for(dialog2, Some(app)).await.unwrap();
    assert_eq!(order(&service).await, vec![dialog1, dialog2, app, home]);
}

#[tokio::test]
async fn configure_requests_restack_relative_to_siblings() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let app1 = show(&service, WindowType::Application, |_| {}).await;
    let app2 = show(&service, WindowType::Application, |_| {}).await;
    assert_eq!(order(&service).await, vec![app2, app1, home]);

    // Configure the topmost application below the other.
    service
        .configure_stacking(
            app2,
            StackRequest {
                sibling: Some(app1),
                placement: StackPlacement::Below,
            },
        )
        .await
        .unwrap();
    assert_eq!(order(&service).await, vec![app1, app2, home]);

    // Configure the bottommost application above the other.
    service
        .configure_stacking(
            app2,
            StackRequest {
                sibling: Some(app1),
                placement: StackPlacement::Above,
            },
        )
        .await
        .unwrap();
    assert_eq!(order(&service).await, vec![app2, app1, home]);

    // Sibling "none" means the top of the band.
    service
        .configure_stacking(
            app1,
            StackRequest {
                sibling: None,
                placement: StackPlacement::Above,
            },
        )
        .await
        .unwrap();
    assert_eq!(order(&service).await, vec![app1, app2, home]);
}

#[tokio::test]
async fn notification_band_sits_between_the_stacking_layers() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let level6 = show(&service, WindowType::Application, |s| s.stacking_layer = 6).await;
    let note = show(&service, WindowType::Notification, |_| {}).await;
    let app = show(&service, WindowType::Application, |_| {}).await;
    let dialog = show(&service, WindowType::Dialog, |_| {}).await;
    let input = show(&service, WindowType::Input, |_| {}).await;
    let level5 = show(&service, WindowType::Application, |s| s.stacking_layer = 5).await;

    assert_eq!(
        order(&service).await,
        vec![level6, note, level5, input, dialog, app, home]
    );
}

#[tokio::test]
async fn stacking_layer_ladder_leapfrogs_over_system_modal() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let app1 = show(&service, WindowType::Application, |_| {}).await;
    let trans1 = show(&service, WindowType::Application, |s| {
        s.transient_for = Some(app1)
    })
    .await;
    let trans2 = show(&service, WindowType::Application, |s| {
        s.transient_for = Some(trans1)
    })
    .await;
    let trans3 = show(&service, WindowType::Application, |s| {
        s.transient_for = Some(trans2)
    })
    .await;
    let app2 = show(&service, WindowType::Application, |_| {}).await;
    let modal = show(&service, WindowType::Dialog, |s| s.modal = true).await;
    assert_eq!(
        order(&service).await,
        vec![modal, app2, trans3, trans2, trans1, app1, home]
    );

    // Level 1 lifts the first application, with its whole transient
    // chain, above the system-modal dialog.
    service
        .set_property(app1, PropertyChange::StackingLayer(1))
        .await
        .unwrap();
    assert_eq!(
        order(&service).await,
        vec![trans3, trans2, trans1, app1, modal, app2, home]
    );

    // Alternating bumps keep the apps leapfrogging while the dialog
    // stays below every layered window.
    for level in 1..=10u8 {
        if level % 2 == 1 {
            service
                .set_property(app2, PropertyChange::StackingLayer(level))
                .await
                .unwrap();
            assert_eq!(
                order(&service).await,
                vec![app2, trans3, trans2, trans1, app1, modal, home]
            );
        } else {
            service
                .set_property(app1, PropertyChange::StackingLayer(level))
                .await
                .unwrap();
            assert_eq!(
                order(&service).await,
                vec![trans3, trans2, trans1, app1, app2, modal, home]
            );
        }
    }
}

#[tokio::test]
async fn input_window_composites_its_owner_only_while_mapped() {
    let service = service();
    let _home = show(&service, WindowType::Desktop, |_| {}).await;
    let app = show(&service, WindowType::Application, |_| {}).await;
    assert_eq!(render_mode(&service, app).await, RenderMode::Direct);

    // A transient input window switches the app to composited while
    // itself staying direct.
    let input = show(&service, WindowType::Input, |s| {
        s.transient_for = Some(app)
    })
    .await;
    assert_eq!(render_mode(&service, app).await, RenderMode::Composited);
    assert_eq!(render_mode(&service, input).await, RenderMode::Direct);

    service.unmap_window(input).await.unwrap();
    assert_eq!(render_mode(&service, app).await, RenderMode::Direct);
    service.destroy_window(input).await.unwrap();

    // Setting the transiency only after mapping ends up in the same
    // state.
    let input2 = show(&service, WindowType::Input, |_| {}).await;
    service.set_transient_for(input2, Some(app)).await.unwrap();
    assert_eq!(render_mode(&service, app).await, RenderMode::Composited);
    assert_eq!(render_mode(&service, input2).await, RenderMode::Direct);
}

#[tokio::test]
async fn opaque_override_toggles_compositing() {
    let service = service();
    let _home = show(&service, WindowType::Desktop, |_| {}).await;
    let argb = show(&service, WindowType::Application, |s| s.has_alpha = true).await;
    assert_eq!(render_mode(&service, argb).await, RenderMode::Composited);

    service
        .set_property(argb, PropertyChange::OpaqueOverride(OpaqueOverride::ForceOpaque))
        .await
        .unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Direct);

    service
        .set_property(argb, PropertyChange::OpaqueOverride(OpaqueOverride::Unset))
        .await
        .unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Composited);

    // The override also survives an unmap/remap cycle.
    service.unmap_window(argb).await.unwrap();
    service
        .set_property(argb, PropertyChange::OpaqueOverride(OpaqueOverride::ForceOpaque))
        .await
        .unwrap();
    service.map_window(argb).await.unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Direct);
}

#[tokio::test]
async fn low_power_mode_is_orthogonal_to_display_power() {
    let service = service();
    let argb = show(&service, WindowType::Application, |s| {
        s.has_alpha = true;
        s.stacking_layer = 10;
    })
    .await;
    assert_eq!(render_mode(&service, argb).await, RenderMode::Composited);

    service
        .set_property(argb, PropertyChange::LowPowerMode(true))
        .await
        .unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Direct);

    // Turning the display off changes nothing for the render mode.
    service.set_display_off(true).await.unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Direct);
    assert_eq!(visibility(&service, argb).await, Visibility::Unobscured);

    // Clearing the flag with the display still off switches back to
    // composited.
    service
        .set_property(argb, PropertyChange::LowPowerMode(false))
        .await
        .unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Composited);
    assert_eq!(visibility(&service, argb).await, Visibility::FullyObscured);

    service
        .set_property(argb, PropertyChange::LowPowerMode(true))
        .await
        .unwrap();
    assert_eq!(render_mode(&service, argb).await, RenderMode::Direct);
}

#[tokio::test]
async fn obscured_state_follows_map_and_unmap() {
    let service = service();
    let win1 = show(&service, WindowType::Application, |_| {}).await;
    assert_eq!(visibility(&service, win1).await, Visibility::Unobscured);

    let win2 = show(&service, WindowType::Application, |_| {}).await;
    assert_eq!(visibility(&service, win1).await, Visibility::FullyObscured);
    assert_eq!(visibility(&service, win2).await, Visibility::Unobscured);

    service.unmap_window(win2).await.unwrap();
    assert_eq!(visibility(&service, win1).await, Visibility::Unobscured);

    // An ARGB window on top never obscures what is underneath.
    let argb = show(&service, WindowType::Application, |s| s.has_alpha = true).await;
    assert_eq!(visibility(&service, argb).await, Visibility::Unobscured);
    assert_eq!(visibility(&service, win1).await, Visibility::Unobscured);
}

#[tokio::test]
async fn unmapped_window_remembers_bottom_configuration() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;

    // Created but not mapped: conceptually at the top.
    let app1 = service
        .create_window(CreateWindowSpec::new(WindowType::Application, SCREEN))
        .await
        .unwrap();
    assert_eq!(order(&service).await, vec![app1, home]);
    assert!(!service.snapshot().await.row(app1).unwrap().viewable);

    // Stack it to the bottom; the configuration is remembered.
    service
        .configure_stacking(
            app1,
            StackRequest {
                sibling: None,
                placement: StackPlacement::Below,
            },
        )
        .await
        .unwrap();
    assert_eq!(order(&service).await, vec![home, app1]);

    // Mapping keeps the configured position.
    service.map_window(app1).await.unwrap();
    assert_eq!(order(&service).await, vec![home, app1]);
    assert!(service.snapshot().await.row(app1).unwrap().viewable);

    // A new application window still appears on top.
    let app2 = show(&service, WindowType::Application, |_| {}).await;
    assert_eq!(order(&service).await, vec![app2, home, app1]);

    // Unmapping keeps the position; configuring to the bottom while
    // unmapped is honored on the next map.
    service.unmap_window(app2).await.unwrap();
    assert_eq!(order(&service).await, vec![app2, home, app1]);
    service
        .configure_stacking(
            app2,
            StackRequest {
                sibling: None,
                placement: StackPlacement::Below,
            },
        )
        .await
        .unwrap();
    assert_eq!(order(&service).await, vec![home, app1, app2]);
    service.map_window(app2).await.unwrap();
    assert_eq!(order(&service).await, vec![home, app1, app2]);
}

#[tokio::test]
async fn fullscreen_window_is_decorated_during_a_call() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let deco = show(&service, WindowType::Decorator, |_| {}).await;
    let app = show(&service, WindowType::Application, |s| s.fullscreen = true).await;

    // Without a call the decorator is parked at the bottom and the app
    // renders direct.
    assert_eq!(order(&service).await, vec![app, home, deco]);
    assert_eq!(render_mode(&service, app).await, RenderMode::Direct);

    service.set_call_ongoing(true).await.unwrap();
    assert_eq!(order(&service).await, vec![deco, app, home]);
    assert_eq!(render_mode(&service, app).await, RenderMode::Composited);

    // A fullscreen app painting its own statusbar is not decorated: the
    // decorator stays with the app below it instead of covering it.
    let statusbar_app = show(&service, WindowType::Application, |s| s.fullscreen = true).await;
    service
        .set_property(
            statusbar_app,
            PropertyChange::StatusbarGeometry(Some(RectInt::new(0, 0, 864, 36))),
        )
        .await
        .unwrap();
    assert_eq!(
        order(&service).await,
        vec![statusbar_app, deco, app, home]
    );

    service.set_call_ongoing(false).await.unwrap();
    assert_eq!(
        order(&service).await,
        vec![statusbar_app, app, home, deco]
    );
}

#[tokio::test]
async fn rotation_never_changes_the_order() {
    let service = service();
    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let input = show(&service, WindowType::Input, |_| {}).await;
    let app = show(&service, WindowType::Application, |_| {}).await;
    let dialog = show(&service, WindowType::Dialog, |_| {}).await;
    let before = vec![input, dialog, app, home];
    assert_eq!(order(&service).await, before);

    for degrees in [90, 180, 270, 0, 270, 90] {
        let angle = OrientationAngle::from_degrees(degrees).unwrap();
        service.set_orientation(angle).await.unwrap();
        assert_eq!(service.orientation().await, angle);
        assert_eq!(order(&service).await, before);
    }
}

#[tokio::test]
async fn events_are_published_to_subscribers() {
    let service = service();
    let mut events = service.subscribe();

    let home = show(&service, WindowType::Desktop, |_| {}).await;
    let mut saw_created = false;
    let mut saw_stacking = false;
    while let Ok(event) = events.try_recv() {
        match event {
            EngineEvent::WindowCreated { handle } if handle == home => saw_created = true,
            EngineEvent::StackingChanged { ref order } if order.contains(&home) => {
                saw_stacking = true
            }
            _ => {}
        }
    }
    assert!(saw_created);
    assert!(saw_stacking);

    let angle = OrientationAngle::Deg90;
    service.set_orientation(angle).await.unwrap();
    let mut saw_orientation = false;
    while let Ok(event) = events.try_recv() {
        if event == (EngineEvent::OrientationChanged { angle }) {
            saw_orientation = true;
        }
    }
    assert!(saw_orientation);
}

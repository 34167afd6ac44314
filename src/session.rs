//! Session state and collaborator seams.
//!
//! The screen layer composes each frame from whatever the rest of the
//! client reports: connection progress, demo recording, the local player's
//! situation. [`SessionSnapshot`] is that report, captured once per frame
//! by the driver. [`ClientSystems`] is the seam to the subsystems the
//! screen hands control to (menu, console, world renderer, cinematics).

use crate::backend::StereoEye;

// =============================================================================
// Connection State
// =============================================================================

/// Progress of the client's server connection. Every stage gets an
/// explicit compose branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection; the main menu owns the screen.
    #[default]
    Disconnected,
    /// Resolving and contacting the server.
    Connecting,
    /// Awaiting the connection challenge response.
    Challenging,
    /// Netchan established, awaiting gamestate.
    Connected,
    /// Receiving the map and configstrings.
    Loading,
    /// Gamestate received, awaiting the first snapshot.
    Primed,
    /// In the world and receiving snapshots.
    Active,
    /// Playing a full-screen cinematic.
    Cinematic,
}

/// Menus the screen layer can force active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuId {
    None,
    Main,
    InGame,
}

// =============================================================================
// Collaborator Seams
// =============================================================================

/// The menu/UI subsystem, as seen from screen composition.
pub trait MenuSystem {
    /// Whether the active menu covers the entire screen.
    fn is_fullscreen(&self) -> bool;
    /// Force a menu active (or none).
    fn set_active_menu(&mut self, menu: MenuId);
    /// Per-frame UI tick.
    fn refresh(&mut self, realtime: i32);
    /// Draw the connection progress screen. `overlay` draws it on top of
    /// the partially loaded world rather than on a blank screen.
    fn draw_connect_screen(&mut self, overlay: bool);
}

/// Everything the screen layer delegates to during a frame.
pub trait ClientSystems {
    /// The menu subsystem, if one is loaded this frame.
    fn menu(&mut self) -> Option<&mut dyn MenuSystem>;
    /// Draw the console over whatever has been composed so far.
    fn draw_console(&mut self);
    /// Render the 3D world for one eye.
    fn render_world(&mut self, eye: StereoEye);
    /// Draw the current cinematic frame.
    fn draw_cinematic(&mut self);
    /// Silence all sound channels.
    fn stop_all_sounds(&mut self);
}

// =============================================================================
// Per-Frame Snapshot
// =============================================================================

/// Local wall-clock time for the on-screen clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Everything the screen layer reads from the client for one frame.
#[derive(Clone, Copy, Debug)]
pub struct SessionSnapshot<'a> {
    pub state: ConnectionState,
    /// Client realtime, in milliseconds.
    pub realtime: i32,
    pub wall_clock: WallClock,
    /// The menu currently has input focus.
    pub menu_owns_input: bool,
    /// A demo is being written to disk.
    pub demo_recording: bool,
    /// The recording is a server-side spectator demo, not the player's own.
    pub spectator_demo: bool,
    /// Name of the demo file being recorded.
    pub demo_name: &'a str,
    /// Current write position in the demo file, in bytes.
    pub demo_file_pos: u64,
    /// Kill count for the current life.
    pub kills: u32,
    /// Local player is spectating.
    pub spectating: bool,
    /// The rendered view belongs to the local player.
    pub pov_is_self: bool,
    pub paused: bool,
    /// The gun code drew a scope overlay this frame.
    pub sniper_drawn: bool,
}

impl Default for SessionSnapshot<'_> {
    fn default() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            realtime: 0,
            wall_clock: WallClock::default(),
            menu_owns_input: false,
            demo_recording: false,
            spectator_demo: false,
            demo_name: "",
            demo_file_pos: 0,
            kills: 0,
            spectating: false,
            pov_is_self: true,
            paused: false,
            sniper_drawn: false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_disconnected_self_pov() {
        let snap = SessionSnapshot::default();
        assert_eq!(snap.state, ConnectionState::Disconnected);
        assert!(snap.pov_is_self, "default view belongs to the local player");
        assert!(!snap.demo_recording);
    }
}

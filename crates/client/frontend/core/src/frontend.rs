//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use client_session::SessionHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with the game server via [`SessionHandle`]:
/// - Subscribe to session events (combat snapshots, world time, energy)
/// - Submit combat actions
///
/// Frontends do NOT own the session pollers - they receive a handle only.
///
/// # Implementations
///
/// - `CliFrontend`: Terminal-based UI (ratatui + crossterm)
///
/// # Example Implementation
///
/// ```no_run
/// use anyhow::Result;
/// use async_trait::async_trait;
/// use client_frontend_core::Frontend;
/// use client_session::SessionHandle;
///
/// struct LogFrontend;
///
/// #[async_trait]
/// impl Frontend for LogFrontend {
///     async fn run(&mut self, handle: SessionHandle) -> Result<()> {
///         let mut events = handle.subscribe();
///         while let Ok(event) = events.recv().await {
///             println!("{:?}", event);
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop until the user quits or the combat
    /// completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, handle: SessionHandle) -> Result<()>;
}

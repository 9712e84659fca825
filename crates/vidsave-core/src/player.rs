//! Optional external player for the current playlist entry.
//!
//! At most one player process runs at a time; moving to the next entry
//! replaces it. Without a configured program this is a no-op.

use std::io;
use std::process::{Child, Command, Stdio};

#[derive(Debug, Default)]
pub struct Player {
    program: Option<String>,
    child: Option<Child>,
}

impl Player {
    pub fn new(program: Option<String>) -> Self {
        Self {
            program,
            child: None,
        }
    }

    /// Stop whatever is playing and start `url`.
    pub fn play(&mut self, url: &str) -> io::Result<()> {
        self.stop();
        let Some(program) = &self.program else {
            return Ok(());
        };
        let child = Command::new(program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!(pid = child.id(), %url, "player started");
        self.child = Some(child);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            // Already exited is fine.
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

use std::str::FromStr;

use anyhow::bail;

use super::View;
use crate::host::{Host, WorkspaceId};

/// A strategy for picking the workspace to land on when the overview closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitBehavior {
    /// The workspace under the pointer.
    Hovered,
    /// The workspace that was active when the overview opened.
    Original,
    /// The monitor's active workspace right now.
    Interacted,
}

impl FromStr for ExitBehavior {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hovered" => Ok(Self::Hovered),
            "original" => Ok(Self::Original),
            "interacted" => Ok(Self::Interacted),
            _ => bail!("invalid exit behavior {s:?}, expected hovered, original or interacted"),
        }
    }
}

impl View {
    /// Picks the workspace to land on when the overview closes.
    ///
    /// With `override_hover`, a hovered slot on this monitor wins over the configured strategies.
    pub fn resolve_exit_target<H: Host>(
        &self,
        host: &H,
        override_hover: bool,
    ) -> Option<WorkspaceId> {
        self.monitor(host)?;

        let hovered = self.hovered_workspace(host);
        if override_hover && hovered.is_some() {
            return hovered;
        }

        for keyword in &self.options.exit_behavior {
            let behavior = match keyword.parse::<ExitBehavior>() {
                Ok(behavior) => behavior,
                Err(err) => {
                    warn!("{err:#}");
                    continue;
                }
            };

            let target = match behavior {
                ExitBehavior::Hovered => hovered,
                ExitBehavior::Original => self
                    .origin_workspace
                    .filter(|id| host.workspace_exists(*id)),
                ExitBehavior::Interacted => host.active_workspace(self.monitor_id),
            };

            match target {
                Some(id) => return Some(id),
                None => debug!("exit behavior {keyword:?} found no workspace"),
            }
        }

        None
    }

    /// Switches the monitor to the exit target, creating the workspace if needed.
    pub fn do_exit_behavior<H: Host>(&mut self, host: &mut H, override_hover: bool) {
        let Some(target) = self.resolve_exit_target(host, override_hover) else {
            debug!("no exit workspace for monitor {}", self.monitor_id);
            return;
        };

        if !host.workspace_exists(target) && !host.create_workspace(target, self.monitor_id) {
            warn!("couldn't create workspace {target} on monitor {}", self.monitor_id);
            return;
        }

        host.switch_to(self.monitor_id, target);
    }
}

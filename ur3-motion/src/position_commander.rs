use tracing::{debug, error, info};
use ur3_arci::ArmGroup;
use ur3_motion_config::NamedPositions;

use crate::Error;

/// Moves one planning group to named joint positions.
#[derive(Debug)]
pub struct PositionCommander<A> {
    arm: A,
    positions: NamedPositions,
}

impl<A> PositionCommander<A>
where
    A: ArmGroup,
{
    pub fn new(arm: A, positions: NamedPositions) -> Self {
        Self { arm, positions }
    }

    pub fn arm(&self) -> &A {
        &self.arm
    }

    pub fn positions(&self) -> &NamedPositions {
        &self.positions
    }

    pub fn available_positions(&self) -> Vec<String> {
        self.positions.names().map(str::to_owned).collect()
    }

    /// Moves to `name` and waits until the motion is executed.
    ///
    /// Nothing is sent to the arm if `name` is not defined.
    pub async fn try_move_to_named_position(&self, name: &str) -> Result<(), Error> {
        let Some(positions) = self.positions.get(name) else {
            return Err(Error::PositionNotFound(name.to_owned()));
        };
        debug!(
            group = %self.arm.group_name(),
            position = name,
            ?positions,
            "moving to named position"
        );
        self.arm
            .move_to_joint_positions(positions.to_vec())?
            .await?;
        info!("Moved to position: {name}");
        Ok(())
    }

    /// Moves to `name` and waits until the motion is executed, logging any
    /// failure instead of returning it.
    ///
    /// Returns `true` if the position was reached.
    pub async fn move_to_named_position(&self, name: &str) -> bool {
        match self.try_move_to_named_position(name).await {
            Ok(()) => true,
            Err(e) => {
                error!("{e}");
                false
            }
        }
    }
}

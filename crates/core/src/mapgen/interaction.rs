//! Facing-direction queries a host runs against a finished level.

use crate::types::{Direction, Pos};

use super::model::{GeneratedLevel, Interactable};

impl GeneratedLevel {
    /// Whether an agent may stand on `pos`. Anything outside the grid is blocked.
    pub fn can_go(&self, pos: Pos) -> bool {
        self.grid.can_go(pos)
    }

    /// What a player standing on `pos` and facing `direction` would interact with.
    ///
    /// A dispenser under the player wins when it faces the same way; otherwise the prize or
    /// utility booth one step ahead answers if its aisle side is the one being faced.
    pub fn interaction_at(&self, pos: Pos, direction: Direction) -> Option<Interactable> {
        if let Some(&id) = self.dispenser_at.get(&pos)
            && self.dispensers.get(id).is_some_and(|dispenser| dispenser.interaction == direction)
        {
            return Some(Interactable::Dispenser(id));
        }

        let ahead = pos.step(direction);
        let &id = self.interactive_booths.get(&ahead)?;
        let booth = self.booths.get(id)?;
        (booth.interaction == Some(direction)).then_some(Interactable::Booth(id))
    }
}

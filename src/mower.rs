use std::fmt::Display;

use crate::field::OccupancyGrid;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heading::North => write!(f, "N"),
            Heading::South => write!(f, "S"),
            Heading::East => write!(f, "E"),
            Heading::West => write!(f, "W"),
        }
    }
}

impl TryFrom<char> for Heading {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'N' => Ok(Heading::North),
            'S' => Ok(Heading::South),
            'E' => Ok(Heading::East),
            'W' => Ok(Heading::West),
            other => Err(Error::InvalidHeading(other.to_string())),
        }
    }
}

impl Heading {
    pub fn turned_left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn turned_right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug)]
pub struct Mower {
    name: String,
    pos: Position,
    heading: Heading,
    x_limit: usize,
    y_limit: usize,
}

impl Display for Mower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.pos.x, self.pos.y, self.heading)
    }
}

impl Mower {
    pub fn new(
        name: String,
        x_limit: usize,
        y_limit: usize,
        x: usize,
        y: usize,
        heading: Heading,
    ) -> Self {
        Self {
            name,
            pos: Position::new(x, y),
            heading,
            x_limit,
            y_limit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// The cell one step along the current heading, clamped to the grid, so
    /// advancing at an edge yields the current cell.
    pub fn ahead_pos(&self) -> Position {
        match self.heading {
            Heading::North => Position::new(self.pos.x, self.y_limit.min(self.pos.y + 1)),
            Heading::South => Position::new(self.pos.x, self.pos.y.saturating_sub(1)),
            Heading::East => Position::new(self.x_limit.min(self.pos.x + 1), self.pos.y),
            Heading::West => Position::new(self.pos.x.saturating_sub(1), self.pos.y),
        }
    }

    pub fn execute(&mut self, instructions: &str, grid: &mut OccupancyGrid) {
        for instr in instructions.trim().chars() {
            match instr {
                'G' => self.heading = self.heading.turned_left(),
                'D' => self.heading = self.heading.turned_right(),
                'A' => {
                    let next_pos = self.ahead_pos();
                    // An advance landing on an occupied cell is dropped. This
                    // also covers the clamped edge case, where the candidate
                    // is the mower's own cell.
                    if !grid.is_occupied(&next_pos) {
                        grid.vacate(&self.pos);
                        grid.occupy(&next_pos);
                        self.pos = next_pos;
                    }
                }
                other => log::error!("{}: invalid instruction({}), skipped.", self.name, other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::OccupancyGrid;

    fn placed_mower(grid: &mut OccupancyGrid, x: usize, y: usize, heading: Heading) -> Mower {
        let mower = Mower::new("mower_1".to_string(), 5, 5, x, y, heading);
        grid.occupy(mower.pos());
        mower
    }

    #[test]
    fn rotation_follows_the_fixed_table() {
        let mut grid = OccupancyGrid::new(5, 5);
        for (instructions, expect_heading) in [
            ("G", Heading::West),
            ("D", Heading::East),
            ("GG", Heading::South),
            ("DD", Heading::South),
        ] {
            let mut mower = Mower::new("mower_1".to_string(), 5, 5, 2, 2, Heading::North);
            mower.execute(instructions, &mut grid);
            assert_eq!(mower.heading(), expect_heading);
        }
    }

    #[test]
    fn advance_moves_one_cell_along_heading() {
        let mut grid = OccupancyGrid::new(5, 5);
        let mut mower = placed_mower(&mut grid, 0, 0, Heading::North);
        mower.execute("AAA", &mut grid);

        assert_eq!(*mower.pos(), Position::new(0, 3));
        assert_eq!(mower.heading(), Heading::North);
        assert!(grid.is_occupied(&Position::new(0, 3)));
        assert!(!grid.is_occupied(&Position::new(0, 0)));
    }

    #[test]
    fn advance_at_grid_edge_is_a_no_op() {
        let mut grid = OccupancyGrid::new(5, 5);
        let mut mower = placed_mower(&mut grid, 0, 0, Heading::South);
        mower.execute("A", &mut grid);
        assert_eq!(*mower.pos(), Position::new(0, 0));
        assert_eq!(mower.heading(), Heading::South);

        let mut grid = OccupancyGrid::new(5, 5);
        let mut mower = placed_mower(&mut grid, 5, 2, Heading::East);
        mower.execute("A", &mut grid);
        assert_eq!(*mower.pos(), Position::new(5, 2));
        assert_eq!(mower.heading(), Heading::East);
    }

    #[test]
    fn advance_into_occupied_cell_is_ignored() {
        let mut grid = OccupancyGrid::new(5, 5);
        grid.occupy(&Position::new(2, 3));
        let mut mower = placed_mower(&mut grid, 2, 2, Heading::North);
        mower.execute("A", &mut grid);

        assert_eq!(*mower.pos(), Position::new(2, 2));
        assert!(grid.is_occupied(&Position::new(2, 2)));
        assert!(grid.is_occupied(&Position::new(2, 3)));
    }

    #[test]
    fn unknown_instructions_are_skipped() {
        let mut grid = OccupancyGrid::new(5, 5);
        let mut mower = placed_mower(&mut grid, 1, 1, Heading::North);
        mower.execute("AXA!", &mut grid);

        assert_eq!(*mower.pos(), Position::new(1, 3));
        assert_eq!(mower.heading(), Heading::North);
    }

    #[test]
    fn out_of_range_start_is_accepted() {
        let mut grid = OccupancyGrid::new(5, 5);
        let mut mower = placed_mower(&mut grid, 9, 9, Heading::West);
        mower.execute("A", &mut grid);

        assert_eq!(*mower.pos(), Position::new(8, 9));
    }
}

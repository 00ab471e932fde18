use crate::runtime::data_structures::value::Value;
use std::{
    collections::VecDeque,
    fmt::{self, Display, Formatter},
};

/// Which end of the deq an operation works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn is_left(&self) -> bool {
        *self == Direction::Left
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Flip the direction when the interpreter's inversion flag is set.
    pub fn inverted_if(&self, inverted: bool) -> Direction {
        if inverted { self.opposite() } else { *self }
    }

    /// The integer scripts see for a direction, 1 for left and 0 for right.
    pub fn as_int(&self) -> i64 {
        self.is_left() as i64
    }
}

/// The double-ended value store.  Values can be pushed onto and popped off of either end, there
/// is no bound on its size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deq {
    values: VecDeque<Value>,
}

impl Deq {
    pub fn new() -> Deq {
        Deq::default()
    }

    pub fn push(&mut self, direction: Direction, value: Value) {
        match direction {
            Direction::Left => self.values.push_front(value),
            Direction::Right => self.values.push_back(value),
        }
    }

    pub fn pop(&mut self, direction: Direction) -> Option<Value> {
        match direction {
            Direction::Left => self.values.pop_front(),
            Direction::Right => self.values.pop_back(),
        }
    }

    /// Does the deq hold at least `count` values?
    pub fn has_at_least(&self, count: usize) -> bool {
        self.values.len() >= count
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The trace rendering, every value followed by its type in parentheses and a space.
impl Display for Deq {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for value in &self.values {
            write!(f, "{}({}) ", value, value.value_type())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::data_structures::value::Data;

    fn int(value: i64) -> Value {
        Value::new(0, Data::Integer(value))
    }

    #[test]
    fn push_and_pop_at_both_ends() {
        let mut deq = Deq::new();

        deq.push(Direction::Right, int(1));
        deq.push(Direction::Right, int(2));
        deq.push(Direction::Left, int(0));

        assert_eq!(deq.to_string(), "0(an integer) 1(an integer) 2(an integer) ");
        assert_eq!(deq.pop(Direction::Left), Some(int(0)));
        assert_eq!(deq.pop(Direction::Right), Some(int(2)));
        assert!(deq.has_at_least(1));
        assert!(!deq.has_at_least(2));
        assert_eq!(deq.pop(Direction::Right), Some(int(1)));
        assert_eq!(deq.pop(Direction::Left), None);
    }

    #[test]
    fn inversion_flips_direction() {
        assert_eq!(Direction::Left.inverted_if(false), Direction::Left);
        assert_eq!(Direction::Left.inverted_if(true), Direction::Right);
        assert_eq!(Direction::Right.inverted_if(true).as_int(), 1);
        assert_eq!(Direction::Right.as_int(), 0);
    }
}

use super::Position;
use std::{iter::Peekable, str::Chars};

#[derive(Debug, Clone)]
pub struct PositionParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> PositionParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    pub fn parse(&mut self) -> Option<Position> {
        self.skip_separators();

        let parenthesized = self.eat('(');
        let mut numbers = Vec::with_capacity(3);

        loop {
            self.skip_separators();

            match self.read_number() {
                Some(number) => numbers.push(number),
                None => break,
            }
        }

        if parenthesized && !self.eat(')') {
            return None;
        }

        self.skip_separators();

        if !self.is_end() {
            return None;
        }

        let coordinates = match numbers.as_slice() {
            [packed] if packed.len() == 3 => packed
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| d as usize)
                .collect::<Vec<_>>(),
            [x, y, z] => vec![
                number_to_coordinate(x)?,
                number_to_coordinate(y)?,
                number_to_coordinate(z)?,
            ],
            _ => return None,
        };

        let position = Position::new(coordinates[0], coordinates[1], coordinates[2]);

        if position.is_valid() {
            return Some(position);
        }

        None
    }

    fn is_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            return true;
        }

        false
    }

    /// Reads a string of numeric characters from the input.
    fn read_number(&mut self) -> Option<String> {
        let mut number = String::new();

        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                number.push(c);
                self.chars.next();
            } else {
                break;
            }
        }

        if !number.is_empty() {
            Some(number)
        } else {
            None
        }
    }

    /// Skips whitespace and commas.
    fn skip_separators(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || c == ',' {
                self.chars.next();
            } else {
                break;
            }
        }
    }
}

fn number_to_coordinate(number: &str) -> Option<usize> {
    number.parse::<usize>().ok()
}

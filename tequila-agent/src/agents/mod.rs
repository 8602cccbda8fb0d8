pub mod random;
pub mod tequila_bot;

pub mod game;
pub mod group;
pub mod history;
pub mod manager;
pub mod participant;
pub mod pick;
pub mod player;
pub mod round;
pub mod standings;

//! Score and economy ledger
//!
//! Score is distance run; coins are the in-run currency and take a single
//! 50% deduction at run end. Donations sit in a separate balance the tax
//! never touches.

use crate::consts::TAX_RATE;

#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    /// Accumulated distance; display score is the floor of this
    pub score: f32,
    pub coins: u32,
    /// Never taxed
    pub donations: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Distance-based accrual
    pub fn update(&mut self, dt: f32, speed: f32) {
        self.score += speed * dt;
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    pub fn add_donation(&mut self, amount: u32) {
        self.donations += amount;
    }

    /// Spend coins; returns false (and changes nothing) if unaffordable
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.coins >= amount {
            self.coins -= amount;
            true
        } else {
            false
        }
    }

    /// One-time end-of-run deduction; returns the amount taken for display
    pub fn apply_final_tax(&mut self) -> u32 {
        let tax = (self.coins as f32 * TAX_RATE).floor() as u32;
        self.coins -= tax;
        tax
    }

    pub fn display_score(&self) -> u32 {
        self.score.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_integrated_distance() {
        let mut board = ScoreBoard::new();
        board.update(1.0, 10.0);
        assert_eq!(board.display_score(), 10);
    }

    #[test]
    fn final_tax_floors_and_returns_deduction() {
        let mut board = ScoreBoard::new();
        board.add_coins(101);
        let taken = board.apply_final_tax();
        assert_eq!(taken, 50);
        assert_eq!(board.coins, 51);
    }

    #[test]
    fn donations_never_taxed() {
        let mut board = ScoreBoard::new();
        board.add_coins(10);
        board.add_donation(40);
        board.apply_final_tax();
        assert_eq!(board.donations, 40);
    }

    #[test]
    fn spend_rejects_overdraft() {
        let mut board = ScoreBoard::new();
        board.add_coins(5);
        assert!(!board.spend_coins(6));
        assert_eq!(board.coins, 5);
        assert!(board.spend_coins(5));
        assert_eq!(board.coins, 0);
    }
}

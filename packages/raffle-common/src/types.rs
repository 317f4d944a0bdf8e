use cosmwasm_schema::cw_serde;

/// Lifecycle of a raffle round.
///
/// Entries are only accepted while `Open`. `Calculating` means a randomness
/// request is in flight and the participant list is frozen.
#[cw_serde]
#[derive(Copy)]
pub enum RaffleState {
    Open,
    Calculating,
}

impl RaffleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleState::Open => "open",
            RaffleState::Calculating => "calculating",
        }
    }
}

impl std::fmt::Display for RaffleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

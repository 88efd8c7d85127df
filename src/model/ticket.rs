//! Domain models for support tickets.

/// Kind of support ticket, selected from the ticket panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    Buying,
    Commission,
    Investor,
    Help,
}

impl TicketKind {
    /// All kinds in panel order.
    pub const ALL: [TicketKind; 4] = [
        TicketKind::Buying,
        TicketKind::Commission,
        TicketKind::Investor,
        TicketKind::Help,
    ];

    /// Short key used in component custom IDs and channel names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Buying => "buy",
            Self::Commission => "commission",
            Self::Investor => "investor",
            Self::Help => "help",
        }
    }

    /// Button label on the ticket panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buying => "Buying",
            Self::Commission => "Commission",
            Self::Investor => "Investor",
            Self::Help => "Help",
        }
    }

    /// Looks a kind up by its key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

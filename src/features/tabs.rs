//! Home tabs.

/// Tabs on the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    /// Account overview.
    #[default]
    Account,
    /// Send funds.
    Send,
    /// Receive addresses.
    Receive,
    /// Balance breakdown.
    Balances,
}

/// Send form values supplied by a payment deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendPrefill {
    /// Recipient address.
    pub address: String,
    /// Amount in zatoshi.
    pub amount: u64,
    /// Optional memo.
    pub memo: Option<String>,
}

/// Home tabs state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsState {
    /// Selected tab.
    pub selected: Tab,
    /// Pending send form prefill.
    pub send_prefill: Option<SendPrefill>,
}

/// Home tabs actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabsAction {
    /// Switch tab.
    SelectTab(Tab),
    /// Open the send tab with values from a payment URI.
    PrefillSend(SendPrefill),
    /// The send form consumed its prefill.
    PrefillConsumed,
}

/// Reduce a tabs action.
pub fn reduce(state: &mut TabsState, action: TabsAction) {
    match action {
        TabsAction::SelectTab(tab) => state.selected = tab,
        TabsAction::PrefillSend(prefill) => {
            state.selected = Tab::Send;
            state.send_prefill = Some(prefill);
        }
        TabsAction::PrefillConsumed => state.send_prefill = None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_selects_send_tab() {
        let mut state = TabsState::default();
        reduce(
            &mut state,
            TabsAction::PrefillSend(SendPrefill {
                address: "ztestsapling1abc".into(),
                amount: 150_000_000,
                memo: None,
            }),
        );
        assert_eq!(state.selected, Tab::Send);
        assert!(state.send_prefill.is_some());
        reduce(&mut state, TabsAction::PrefillConsumed);
        assert!(state.send_prefill.is_none());
    }
}

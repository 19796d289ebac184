//! Transaction engine: dispatch a parsed command to debit and credit legs.
//!
//! A command is turned into a plan of debit and credit legs. Every leg is validated
//! against the current state before any of them is applied, so a refused
//! command leaves the ledger untouched.

use hoard_core::{CoreError, Inventory, ItemValue};
use hoard_dsl::{Action, Payload, parse_command};
use tracing::{debug, info};

use crate::config::Lock;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{AccountRef, Ledger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Debit,
    Credit,
}

#[derive(Debug)]
struct Leg {
    direction: Direction,
    account: AccountRef,
    value: f64,
    items: Inventory,
}

#[derive(Debug, Default)]
struct Plan {
    legs: Vec<Leg>,
    /// Set for Store trades; recorded in the history line.
    price: Option<f64>,
}

impl Plan {
    fn debit(mut self, account: AccountRef, value: f64, items: Inventory) -> Self {
        self.legs.push(Leg {
            direction: Direction::Debit,
            account,
            value,
            items,
        });
        self
    }

    fn credit(mut self, account: AccountRef, value: f64, items: Inventory) -> Self {
        self.legs.push(Leg {
            direction: Direction::Credit,
            account,
            value,
            items,
        });
        self
    }

    fn transfer(from: AccountRef, to: AccountRef, payload: &Payload) -> Self {
        Plan::default()
            .debit(from, payload.value, payload.items.clone())
            .credit(to, payload.value, payload.items.clone())
    }
}

impl Ledger {
    /// Execute a command on behalf of the holder of `key`.
    ///
    /// Returns an empty string on success and the reason otherwise.
    pub fn transaction(&mut self, command: &str, key: &str) -> String {
        match self.try_transaction(command, key) {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// [`Ledger::transaction`] with a typed error.
    pub fn try_transaction(&mut self, command: &str, key: &str) -> LedgerResult<()> {
        let result = self.execute(command, key);
        if let Err(e) = &result {
            debug!(location = %self.location, ledger = %self.name, command, error = %e, "transaction refused");
        }
        result
    }

    fn execute(&mut self, command: &str, key: &str) -> LedgerResult<()> {
        if self.locks.transaction {
            return Err(LedgerError::Locked(Lock::Transaction));
        }
        if command.trim_start().starts_with("Set Value") {
            return self.try_set_value(command, key);
        }

        let actor = command.split_whitespace().next().unwrap_or_default();
        if !self.is_account_name(actor) {
            return Err(LedgerError::account_missing());
        }

        let parsed = parse_command(command)?;
        let (Some(action), Some(actor), Some(counterpart), Some(payload)) = (
            parsed.action(),
            parsed.actor(),
            parsed.counterpart(),
            parsed.payload(),
        ) else {
            return Err(LedgerError::Validation("Command not recognized.".to_string()));
        };

        let actor_ref = self.resolve(actor).ok_or_else(LedgerError::account_missing)?;
        let counterpart_ref = self
            .resolve(counterpart)
            .ok_or_else(LedgerError::account_missing)?;
        if actor_ref == counterpart_ref {
            return Err(LedgerError::Validation(
                "You cannot trade with yourself.".to_string(),
            ));
        }

        let plan = self.plan(action, actor_ref, counterpart_ref, payload, key)?;
        self.validate(&plan)?;
        self.apply(&plan)?;

        let entry = match plan.price {
            Some(price) => format!("{parsed} for {price}"),
            None => parsed.to_string(),
        };
        info!(location = %self.location, ledger = %self.name, command = %entry, "transaction committed");
        self.history.push(entry);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    fn plan(
        &self,
        action: Action,
        actor: AccountRef,
        counterpart: AccountRef,
        payload: &Payload,
        key: &str,
    ) -> LedgerResult<Plan> {
        if actor == AccountRef::Store {
            return Err(LedgerError::Validation(
                "The Store cannot act on its own.".to_string(),
            ));
        }
        if actor == AccountRef::Bank {
            return self.plan_bank(action, counterpart, payload, key);
        }
        if counterpart == AccountRef::Store {
            return self.plan_store(action, actor, payload, key);
        }

        match (action, counterpart) {
            (Action::Take, AccountRef::Pot) => Ok(Plan::transfer(AccountRef::Pot, actor, payload)),
            (Action::Take, _) => Err(LedgerError::Validation(
                "Only the Pot can be taken from.".to_string(),
            )),
            (Action::Give, _) => {
                self.account(actor).authorize(key)?;
                Ok(Plan::transfer(actor, counterpart, payload))
            }
            (Action::Buy | Action::Sell, _) => {
                Err(LedgerError::Validation("Command not recognized.".to_string()))
            }
        }
    }

    /// The Bank mints on `gives` and burns on `takes from`; nothing is
    /// debited from or credited to the Bank itself.
    fn plan_bank(
        &self,
        action: Action,
        counterpart: AccountRef,
        payload: &Payload,
        key: &str,
    ) -> LedgerResult<Plan> {
        if self.locks.bank {
            return Err(LedgerError::Locked(Lock::Bank));
        }
        if !self.is_admin_key(key) {
            return Err(LedgerError::invalid_key());
        }
        if counterpart == AccountRef::Store {
            return Err(LedgerError::Validation(
                "The Bank does not trade with the Store.".to_string(),
            ));
        }

        match action {
            Action::Give => {
                Ok(Plan::default().credit(counterpart, payload.value, payload.items.clone()))
            }
            Action::Take => {
                Ok(Plan::default().debit(counterpart, payload.value, payload.items.clone()))
            }
            Action::Buy | Action::Sell => Err(LedgerError::Validation(
                "The Bank does not trade with the Store.".to_string(),
            )),
        }
    }

    /// Store trades convert between items and currency at library value.
    fn plan_store(
        &self,
        action: Action,
        actor: AccountRef,
        payload: &Payload,
        key: &str,
    ) -> LedgerResult<Plan> {
        if self.locks.store {
            return Err(LedgerError::Locked(Lock::Store));
        }
        if !matches!(action, Action::Buy | Action::Sell) {
            return Err(LedgerError::Validation(
                "Use buys or sells to trade with the Store.".to_string(),
            ));
        }
        self.account(actor).authorize(key)?;
        if payload.value != 0.0 {
            return Err(LedgerError::Validation(
                "The Store only takes items, the price is set by their value.".to_string(),
            ));
        }
        if payload.items.is_empty() {
            return Err(match action {
                Action::Buy => CoreError::NothingGiven.into(),
                _ => CoreError::NothingPassed.into(),
            });
        }
        if payload.items.values().any(|qty| *qty < 1) {
            return Err(CoreError::ItemQuantityTooSmall.into());
        }

        let price = self.store_price(&payload.items)?;
        let items = payload.items.clone();
        let plan = match action {
            Action::Buy if price > 0.0 => Plan::default()
                .credit(actor, 0.0, items)
                .debit(actor, price, Inventory::new()),
            Action::Buy => Plan::default().credit(actor, 0.0, items),
            _ if price > 0.0 => Plan::default()
                .debit(actor, 0.0, items)
                .credit(actor, price, Inventory::new()),
            _ => Plan::default().debit(actor, 0.0, items),
        };
        Ok(Plan {
            price: Some(price),
            ..plan
        })
    }

    /// Total library value of `items`. Fails naming every item the Store
    /// cannot price.
    fn store_price(&self, items: &Inventory) -> LedgerResult<f64> {
        let mut unknown = Vec::new();
        let mut unvalued = Vec::new();
        let mut priceless = Vec::new();
        let mut price = 0.0;

        for (item, qty) in items {
            match self.library.get(item) {
                None => unknown.push(item.as_str()),
                Some(ItemValue::Unvalued) => unvalued.push(item.as_str()),
                Some(ItemValue::Priceless) => priceless.push(item.as_str()),
                Some(ItemValue::Valued(v)) => price += v * *qty as f64,
            }
        }

        if unknown.is_empty() && unvalued.is_empty() && priceless.is_empty() {
            return Ok(price);
        }

        let mut message = String::from("The Store cannot trade these items.");
        for (label, names) in [
            ("Unknown", &unknown),
            ("Unvalued", &unvalued),
            ("Priceless", &priceless),
        ] {
            if !names.is_empty() {
                message.push_str(&format!(" {label}: {}.", names.join(", ")));
            }
        }
        if unknown.is_empty() {
            Err(LedgerError::Validation(message))
        } else {
            Err(LedgerError::NotFound(message))
        }
    }

    // -----------------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------------

    fn validate(&self, plan: &Plan) -> LedgerResult<()> {
        for leg in &plan.legs {
            let account = self.account(leg.account);
            match leg.direction {
                Direction::Debit => account.validate_take(leg.value, &leg.items)?,
                Direction::Credit => account.validate_add(leg.value, &leg.items)?,
            }
        }
        Ok(())
    }

    /// Apply a validated plan. Unseen items are registered first so the
    /// library covers everything an account can hold.
    fn apply(&mut self, plan: &Plan) -> LedgerResult<()> {
        for leg in plan.legs.iter().filter(|l| l.direction == Direction::Credit) {
            for item in leg.items.keys() {
                self.library.register(item);
            }
        }
        for leg in &plan.legs {
            let account = self.account_mut(leg.account);
            match leg.direction {
                Direction::Debit => account.take(leg.value, &leg.items)?,
                Direction::Credit => account.add(leg.value, &leg.items)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hoard_core::{Inventory, ItemValue};
    use proptest::prelude::*;

    use crate::config::LedgerConfig;
    use crate::error::ErrorKind;
    use crate::ledger::Ledger;

    const ADMIN_KEY: &str = "TestBankKey";

    fn items(pairs: &[(&str, i64)]) -> Inventory {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    /// A ledger with `TestAccount` (100gp, Test:1) and `Other` (50gp).
    fn ledger() -> Ledger {
        let mut l = Ledger::new(
            LedgerConfig::new("TestServer", "TestAdmin", ADMIN_KEY).with_name("Test"),
        );
        l.add_user("TestUser", "TestAccount", "TestKey", 100.0, &items(&[("Test", 1)]))
            .unwrap();
        l.add_user("OtherUser", "Other", "OtherKey", 50.0, &Inventory::new())
            .unwrap();
        l
    }

    fn value(l: &Ledger, name: &str) -> f64 {
        l.get_account(name).unwrap().value()
    }

    fn qty(l: &Ledger, name: &str, item: &str) -> i64 {
        l.get_account(name).unwrap().quantity(item)
    }

    // -- Bank --

    #[test]
    fn bank_gives_value() {
        let mut l = ledger();
        assert_eq!(l.transaction("Bank gives TestAccount: 100", ADMIN_KEY), "");
        assert_eq!(value(&l, "TestAccount"), 200.0);
        assert_eq!(value(&l, "Bank"), 0.0);
        assert_eq!(l.history().last().unwrap(), "Bank gives TestAccount: 100");
    }

    #[test]
    fn bank_gives_to_empty_account() {
        let mut l = ledger();
        l.add_user("U", "Fresh", "k", 0.0, &Inventory::new()).unwrap();
        assert_eq!(l.transaction("Bank gives Fresh: 100", ADMIN_KEY), "");
        assert_eq!(value(&l, "Fresh"), 100.0);
    }

    #[test]
    fn bank_wrong_key_changes_nothing() {
        let mut l = ledger();
        l.add_user("U", "Fresh", "k", 0.0, &Inventory::new()).unwrap();
        let history = l.history().len();
        let err = l.try_transaction("Bank gives Fresh: 100", "k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.to_string(), "Invalid Key.");
        assert_eq!(value(&l, "Fresh"), 0.0);
        assert_eq!(l.history().len(), history);
    }

    #[test]
    fn bank_gives_new_item_registers_it() {
        let mut l = ledger();
        assert_eq!(l.transaction("Bank gives TestAccount: VAT:1", ADMIN_KEY), "");
        assert_eq!(qty(&l, "TestAccount", "VAT"), 1);
        assert_eq!(l.library().get("VAT"), Some(ItemValue::Unvalued));
    }

    #[test]
    fn bank_gives_several_items() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("Bank gives TestAccount: Item1:1, Item2: 4, Item9:10", ADMIN_KEY),
            ""
        );
        assert_eq!(qty(&l, "TestAccount", "Item1"), 1);
        assert_eq!(qty(&l, "TestAccount", "Item2"), 4);
        assert_eq!(qty(&l, "TestAccount", "Item9"), 10);
    }

    #[test]
    fn bank_gives_value_and_items() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("Bank gives TestAccount: 100, Item1:1, Item2: 4,", ADMIN_KEY),
            ""
        );
        assert_eq!(value(&l, "TestAccount"), 200.0);
        assert_eq!(qty(&l, "TestAccount", "Item2"), 4);
    }

    #[test]
    fn bank_negative_gift_rejected_without_registering() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("Bank gives TestAccount: 5, New:-1", ADMIN_KEY),
            "Cannot add a negative number of New to inventory."
        );
        assert!(!l.library().contains("New"));
        assert_eq!(value(&l, "TestAccount"), 100.0);
    }

    #[test]
    fn bank_mint_past_largest_quantity_rejected() {
        let mut l = ledger();
        let full = format!("Bank gives TestAccount: Gem:{}", i64::MAX);
        assert_eq!(l.transaction(&full, ADMIN_KEY), "");
        let history = l.history().len();

        assert_eq!(
            l.transaction("Bank gives TestAccount: 5, Gem:1", ADMIN_KEY),
            "Too many Gem."
        );
        assert_eq!(qty(&l, "TestAccount", "Gem"), i64::MAX);
        assert_eq!(value(&l, "TestAccount"), 100.0);
        assert_eq!(l.history().len(), history);
    }

    #[test]
    fn bank_takes_burns_with_sufficiency() {
        let mut l = ledger();
        assert_eq!(l.transaction("Bank takes from TestAccount: 40, Test:1", ADMIN_KEY), "");
        assert_eq!(value(&l, "TestAccount"), 60.0);
        assert_eq!(qty(&l, "TestAccount", "Test"), 0);
        assert!(!l.get_account("TestAccount").unwrap().inventory().contains_key("Test"));

        assert_eq!(
            l.transaction("Bank takes from TestAccount: 61", ADMIN_KEY),
            "You don't have enough money."
        );
        assert_eq!(value(&l, "TestAccount"), 60.0);
    }

    #[test]
    fn bank_lock_blocks_bank_before_key_check() {
        let mut l = ledger();
        l.toggle_bank_lock();
        assert_eq!(
            l.transaction("Bank gives TestAccount: 1", "wrong"),
            "The Bank is locked."
        );
        assert_eq!(value(&l, "TestAccount"), 100.0);
    }

    // -- Locks and dispatch --

    #[test]
    fn transaction_lock_checked_first() {
        let mut l = ledger();
        l.toggle_transaction_lock();
        assert_eq!(l.transaction("garbage", "x"), "Transactions are locked.");
        assert_eq!(
            l.transaction("Set Value Test: 5", ADMIN_KEY),
            "Transactions are locked."
        );
    }

    #[test]
    fn unknown_actor() {
        let mut l = ledger();
        assert_eq!(l.transaction("Nobody gives Other: 5", "x"), "Account does not exist.");
        assert_eq!(l.transaction("", "x"), "Account does not exist.");
    }

    #[test]
    fn unknown_counterpart() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("TestAccount gives Nobody: 5", "TestKey"),
            "Account does not exist."
        );
    }

    #[test]
    fn unrecognized_shape() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("TestAccount dances with Other", "TestKey"),
            "Command not recognized."
        );
    }

    #[test]
    fn cannot_trade_with_self() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("TestAccount gives TestAccount: 5", "TestKey"),
            "You cannot trade with yourself."
        );
    }

    #[test]
    fn set_value_delegates() {
        let mut l = ledger();
        assert_eq!(l.transaction("Set Value Test: 12", "TestKey"), "");
        assert_eq!(l.library().get("Test"), Some(ItemValue::Valued(12.0)));
    }

    // -- Ordinary transfers --

    #[test]
    fn give_between_users() {
        let mut l = ledger();
        assert_eq!(l.transaction("TestAccount gives Other: 50, Test:1", "TestKey"), "");
        assert_eq!(value(&l, "TestAccount"), 50.0);
        assert_eq!(value(&l, "Other"), 100.0);
        assert_eq!(qty(&l, "Other", "Test"), 1);
        assert_eq!(qty(&l, "TestAccount", "Test"), 0);
    }

    #[test]
    fn give_is_all_or_nothing() {
        let mut l = ledger();
        let history = l.history().len();
        assert_eq!(
            l.transaction("Other gives TestAccount: 50, Sword:1", "OtherKey"),
            "You don't have any Sword(s)."
        );
        assert_eq!(value(&l, "Other"), 50.0);
        assert_eq!(value(&l, "TestAccount"), 100.0);
        assert_eq!(qty(&l, "TestAccount", "Sword"), 0);
        assert_eq!(l.history().len(), history);
    }

    #[test]
    fn give_needs_actor_key() {
        let mut l = ledger();
        let err = l.try_transaction("TestAccount gives Other: 5", "OtherKey").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.to_string(), "Invalid Key, you are not TestAccount.");
        assert_eq!(value(&l, "TestAccount"), 100.0);
    }

    #[test]
    fn empty_payload_rejected() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("TestAccount gives Other:", "TestKey"),
            "Nothing Passed. Try again."
        );
    }

    #[test]
    fn negative_give_rejected() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("TestAccount gives Other: -5", "TestKey"),
            "You cannot remove a negative number!"
        );
    }

    #[test]
    fn take_between_users_rejected() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("TestAccount takes from Other: 5", "TestKey"),
            "Only the Pot can be taken from."
        );
        assert_eq!(value(&l, "Other"), 50.0);
    }

    #[test]
    fn give_to_bank() {
        let mut l = ledger();
        assert_eq!(l.transaction("TestAccount gives Bank: 10", "TestKey"), "");
        assert_eq!(value(&l, "Bank"), 10.0);
        assert_eq!(value(&l, "TestAccount"), 90.0);
    }

    // -- Pot --

    #[test]
    fn pot_round_trip_without_keys() {
        let mut l = ledger();
        assert_eq!(l.transaction("TestAccount gives Pot: 30, Test:1", "TestKey"), "");
        assert_eq!(value(&l, "Pot"), 30.0);
        assert_eq!(qty(&l, "Pot", "Test"), 1);

        assert_eq!(l.transaction("Other takes from Pot: 30, Test:1", "anything"), "");
        assert_eq!(value(&l, "Pot"), 0.0);
        assert_eq!(value(&l, "Other"), 80.0);
        assert_eq!(qty(&l, "Other", "Test"), 1);
    }

    #[test]
    fn pot_cannot_overdraw() {
        let mut l = ledger();
        assert_eq!(
            l.transaction("Other takes from Pot: 1", ""),
            "You don't have enough money."
        );
    }

    // -- Store --

    fn store_ledger() -> Ledger {
        let mut l = ledger();
        l.create_item("Rope", ItemValue::Valued(2.5), ADMIN_KEY).unwrap();
        l.create_item("Crown", ItemValue::Priceless, ADMIN_KEY).unwrap();
        l
    }

    #[test]
    fn store_round_trip_restores_state() {
        let mut l = store_ledger();
        let before = l.get_account("TestAccount").unwrap().clone();

        assert_eq!(l.transaction("TestAccount buys Rope:4", "TestKey"), "");
        assert_eq!(value(&l, "TestAccount"), 90.0);
        assert_eq!(qty(&l, "TestAccount", "Rope"), 4);
        assert_eq!(l.history().last().unwrap(), "TestAccount buys Rope:4 for 10");

        assert_eq!(l.transaction("TestAccount sells Rope:4", "TestKey"), "");
        assert_eq!(l.get_account("TestAccount").unwrap(), &before);
    }

    #[test]
    fn store_buy_needs_funds() {
        let mut l = store_ledger();
        assert_eq!(
            l.transaction("Other buys Rope:21", "OtherKey"),
            "You don't have enough money."
        );
        assert_eq!(qty(&l, "Other", "Rope"), 0);
        assert_eq!(value(&l, "Other"), 50.0);
    }

    #[test]
    fn store_sell_needs_items() {
        let mut l = store_ledger();
        assert_eq!(
            l.transaction("Other sells Rope:1", "OtherKey"),
            "You don't have any Rope(s)."
        );
        assert_eq!(value(&l, "Other"), 50.0);
    }

    #[test]
    fn store_reports_unpriceable_items() {
        let mut l = store_ledger();
        let err = l
            .try_transaction("TestAccount buys Rope:1, Test:1, Crown:1, Ghost:1", "TestKey")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The Store cannot trade these items. Unknown: Ghost. Unvalued: Test. Priceless: Crown."
        );
        assert_eq!(value(&l, "TestAccount"), 100.0);
        assert_eq!(qty(&l, "TestAccount", "Rope"), 0);
    }

    #[test]
    fn store_lock_closes_store() {
        let mut l = store_ledger();
        l.toggle_store_lock();
        assert_eq!(l.transaction("TestAccount buys Rope:1", "TestKey"), "The Store is closed.");
        assert_eq!(l.transaction("TestAccount gives Other: 1", "TestKey"), "");
    }

    #[test]
    fn store_rejects_currency_and_gifts() {
        let mut l = store_ledger();
        assert!(!l.transaction("TestAccount buys 5, Rope:1", "TestKey").is_empty());
        assert_eq!(
            l.transaction("TestAccount gives Store: 5", "TestKey"),
            "Use buys or sells to trade with the Store."
        );
        assert_eq!(
            l.transaction("Store gives TestAccount: 5", ADMIN_KEY),
            "The Store cannot act on its own."
        );
        assert_eq!(value(&l, "TestAccount"), 100.0);
    }

    #[test]
    fn store_trade_needs_actor_key() {
        let mut l = store_ledger();
        let err = l.try_transaction("TestAccount buys Rope:2", "OtherKey").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(value(&l, "TestAccount"), 100.0);
        assert_eq!(l.transaction("TestAccount buys Rope:2", "TestKey"), "");
        assert_eq!(value(&l, "TestAccount"), 95.0);
    }

    #[test]
    fn zero_valued_items_trade_for_free() {
        let mut l = store_ledger();
        l.create_item("Pebble", ItemValue::Valued(0.0), ADMIN_KEY).unwrap();
        assert_eq!(l.transaction("Other buys Pebble:3", "OtherKey"), "");
        assert_eq!(qty(&l, "Other", "Pebble"), 3);
        assert_eq!(value(&l, "Other"), 50.0);
    }

    // -- Invariants --

    fn command_strategy() -> impl Strategy<Value = (String, &'static str)> {
        let account = prop::sample::select(vec!["TestAccount", "Other", "Pot", "Bank", "Store"]);
        let item = prop::sample::select(vec!["Test", "Rope", "Gem"]);
        let verb = prop::sample::select(vec!["gives", "takes from", "buys", "sells"]);
        (account.clone(), verb, account, -20i64..60, item, -2i64..4).prop_map(
            |(actor, verb, other, amount, item, qty)| {
                let key = match actor {
                    "TestAccount" => "TestKey",
                    "Other" => "OtherKey",
                    _ => ADMIN_KEY,
                };
                let command = match verb {
                    "buys" | "sells" => format!("{actor} {verb} {item}:{qty}"),
                    _ => format!("{actor} {verb} {other}: {amount}, {item}:{qty}"),
                };
                (command, key)
            },
        )
    }

    proptest! {
        #[test]
        fn random_commands_keep_invariants(commands in prop::collection::vec(command_strategy(), 1..40)) {
            let mut l = store_ledger();
            for (command, key) in &commands {
                let before = l.clone();
                let history = l.history().len();
                let result = l.transaction(command, key);
                if result.is_empty() {
                    prop_assert_eq!(l.history().len(), history + 1);
                } else {
                    prop_assert_eq!(l.history(), before.history());
                    prop_assert_eq!(l.users(), before.users());
                    prop_assert_eq!(l.get_account("Pot"), before.get_account("Pot"));
                }
                for name in ["Bank", "Store", "Pot", "TestAccount", "Other"] {
                    let account = l.get_account(name).unwrap();
                    prop_assert!(account.value() >= 0.0);
                    for (item, qty) in account.inventory() {
                        prop_assert!(*qty > 0);
                        prop_assert!(l.library().contains(item));
                    }
                }
            }
        }
    }
}

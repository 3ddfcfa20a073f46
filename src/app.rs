// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The controller. It owns the gateway, the state store and every view, and
//! is the only place state changes: user action, validate, call the API,
//! re-fetch from the server, re-render.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::dashboard::{self, DashboardStats};
use crate::editor::{FormMode, TransactionEditor, TransactionFields};
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::Settings;
use crate::notice::NoticeBoard;
use crate::render::{
    ActionKind, DashboardPanel, RowAction, SpendingChart, TerminalPie, TransactionListView,
    render_dashboard, render_transaction_list,
};
use crate::store::StateStore;
use crate::transport::Transport;

type Handler<T> = fn(&mut App<T>, i64) -> Result<(), ApiError>;

/// Settings form contents as typed. Blank or non-numeric amounts count as
/// zero; blank dates are sent as null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub balance: String,
    pub monthly_limit: String,
    pub start_date: String,
    pub end_date: String,
}

impl SettingsForm {
    pub fn from_settings(s: &Settings) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        Self {
            balance: s.balance.normalize().to_string(),
            monthly_limit: s.monthly_limit.normalize().to_string(),
            start_date: date(s.start_date),
            end_date: date(s.end_date),
        }
    }

    pub fn to_settings(&self) -> Result<Settings, ApiError> {
        let amount = |s: &str| s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
        let date = |s: &str| -> Result<Option<NaiveDate>, ApiError> {
            match s.trim() {
                "" => Ok(None),
                s => NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some).map_err(|_| {
                    ApiError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
                }),
            }
        };
        Ok(Settings {
            balance: amount(&self.balance),
            monthly_limit: amount(&self.monthly_limit),
            start_date: date(&self.start_date)?,
            end_date: date(&self.end_date)?,
        })
    }
}

pub struct App<T: Transport> {
    gateway: Gateway<T>,
    store: StateStore,
    notices: NoticeBoard,
    list_view: TransactionListView,
    panel: DashboardPanel,
    chart: SpendingChart<TerminalPie>,
    actions: BTreeMap<RowAction, Handler<T>>,
    create_form: TransactionEditor,
    edit_form: TransactionEditor,
    currency: String,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<T: Transport> App<T> {
    pub fn new(gateway: Gateway<T>, currency: &str) -> Self {
        Self {
            gateway,
            store: StateStore::new(),
            notices: NoticeBoard::default(),
            list_view: TransactionListView::Empty,
            panel: DashboardPanel::full(),
            chart: SpendingChart::new(TerminalPie::new(currency)),
            actions: BTreeMap::new(),
            create_form: TransactionEditor::new(FormMode::Create),
            edit_form: TransactionEditor::new(FormMode::Edit),
            currency: currency.to_string(),
            clock: local_today,
        }
    }

    /// Replace the source of "today" used for default dates and the dashboard.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    pub fn notices(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub fn list_view(&self) -> &TransactionListView {
        &self.list_view
    }

    pub fn panel(&self) -> &DashboardPanel {
        &self.panel
    }

    pub fn chart(&self) -> &SpendingChart<TerminalPie> {
        &self.chart
    }

    pub fn create_form(&self) -> &TransactionEditor {
        &self.create_form
    }

    pub fn edit_form(&self) -> &TransactionEditor {
        &self.edit_form
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }

    /// True once after the server rejected the credential.
    pub fn needs_login(&mut self) -> bool {
        self.gateway.session_mut().take_reauth_request()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        self.gateway.login(username, password)?;
        self.initialize();
        Ok(())
    }

    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.gateway.register(username, email, password)?;
        self.initialize();
        Ok(())
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.gateway.session_mut().logout()?;
        self.store = StateStore::new();
        self.render();
        Ok(())
    }

    /// Load everything and draw. A failed fetch is logged and leaves the
    /// previous state in place.
    pub fn initialize(&mut self) {
        if let Err(e) = self.refresh_transactions() {
            warn!(error = %e, "error fetching transactions");
        }
        if let Err(e) = self.refresh_settings() {
            warn!(error = %e, "error fetching settings");
        }
        if let Err(e) = self.refresh_analytics() {
            warn!(error = %e, "error fetching analytics");
        }
        self.render();
    }

    pub fn refresh_transactions(&mut self) -> Result<(), ApiError> {
        let list = self.gateway.list_transactions()?;
        debug!(count = list.len(), "transactions fetched");
        self.store.replace_transactions(list);
        self.store.derive_categories_from_transactions();
        Ok(())
    }

    /// A missing or zero limit from the server keeps the limit already held.
    pub fn refresh_settings(&mut self) -> Result<(), ApiError> {
        let mut settings = self.gateway.get_settings()?;
        if settings.monthly_limit.is_zero() {
            settings.monthly_limit = self.store.settings().monthly_limit;
        }
        self.store.replace_settings(settings);
        Ok(())
    }

    pub fn refresh_analytics(&mut self) -> Result<(), ApiError> {
        let analytics = self.gateway.get_analytics()?;
        self.store.replace_categories(analytics.categories);
        Ok(())
    }

    fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh_transactions() {
            warn!(error = %e, "error fetching transactions");
        }
        if let Err(e) = self.refresh_analytics() {
            warn!(error = %e, "error fetching analytics");
        }
        self.render();
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        dashboard::compute(
            self.store.transactions(),
            self.store.settings(),
            self.today(),
        )
    }

    /// Re-project the whole store. Idempotent.
    pub fn render(&mut self) {
        self.list_view = render_transaction_list(self.store.transactions(), &self.currency);
        self.actions = self
            .list_view
            .actions()
            .map(|a| (a, Self::handler_for(a.kind)))
            .collect();
        self.redraw_dashboard();
    }

    fn redraw_dashboard(&mut self) {
        let stats = self.dashboard_stats();
        render_dashboard(&stats, &mut self.panel);
        self.chart.render_chart(self.store.categories());
    }

    fn handler_for(kind: ActionKind) -> Handler<T> {
        match kind {
            ActionKind::Edit => |app: &mut App<T>, id: i64| {
                app.open_edit(id);
                Ok(())
            },
            ActionKind::Delete => Self::submit_delete,
        }
    }

    pub fn has_action(&self, action: RowAction) -> bool {
        self.actions.contains_key(&action)
    }

    /// Run the handler registered for `action` by the last render. Actions
    /// from an outdated view are ignored.
    pub fn dispatch(&mut self, action: RowAction) -> Result<(), ApiError> {
        match self.actions.get(&action).copied() {
            Some(handler) => handler(self, action.id),
            None => {
                debug!(?action, "no handler for action in current view");
                Ok(())
            }
        }
    }

    pub fn open_create(&mut self, fields: TransactionFields) {
        self.create_form.open(fields, None);
    }

    pub fn submit_create(&mut self, fields: TransactionFields) -> Result<(), ApiError> {
        let today = self.today();
        let input = match self.create_form.begin_submit(fields, today) {
            Ok(input) => input,
            Err(e) => {
                self.notices.error(e.to_string());
                return Err(e);
            }
        };
        match self.gateway.create_transaction(&input) {
            Ok(created) => {
                debug!(id = created.id, "transaction created");
                self.create_form.succeed();
                self.refresh_after_mutation();
                self.notices.success("Transaction added");
                Ok(())
            }
            Err(e) => Err(self.report_form_failure(FormMode::Create, e, "Failed to add transaction")),
        }
    }

    /// Populate the edit form from the current snapshot. Unknown ids do nothing.
    pub fn open_edit(&mut self, id: i64) -> bool {
        match self.store.find(id) {
            Some(t) => {
                let fields = TransactionFields::from_transaction(t);
                self.edit_form.open(fields, Some(id));
                true
            }
            None => {
                debug!(id, "edit requested for transaction not in view");
                false
            }
        }
    }

    pub fn submit_update(&mut self, id: i64, fields: TransactionFields) -> Result<(), ApiError> {
        let today = self.today();
        let input = match self.edit_form.begin_submit(fields, today) {
            Ok(input) => input,
            Err(e) => {
                self.notices.error(e.to_string());
                return Err(e);
            }
        };
        match self.gateway.update_transaction(id, &input) {
            Ok(_) => {
                self.refresh_after_mutation();
                self.edit_form.succeed();
                self.notices.success("Transaction updated");
                Ok(())
            }
            Err(e) => Err(self.report_form_failure(FormMode::Edit, e, "Failed to update transaction")),
        }
    }

    /// Submit whatever the open edit form currently holds.
    pub fn submit_open_edit(&mut self) -> Result<(), ApiError> {
        let (Some(id), Some(fields)) = (self.edit_form.target(), self.edit_form.fields().cloned())
        else {
            return Ok(());
        };
        self.submit_update(id, fields)
    }

    pub fn edit_fields_mut(&mut self) -> Option<&mut TransactionFields> {
        self.edit_form.fields_mut()
    }

    pub fn close_edit(&mut self) {
        self.edit_form.close();
    }

    pub fn submit_delete(&mut self, id: i64) -> Result<(), ApiError> {
        match self.gateway.delete_transaction(id) {
            Ok(()) => {
                self.refresh_after_mutation();
                self.notices.success("Transaction deleted");
                Ok(())
            }
            Err(e) => {
                self.notices
                    .error(e.notice_text("Failed to delete transaction"));
                Err(e)
            }
        }
    }

    pub fn save_settings(&mut self, form: &SettingsForm) -> Result<(), ApiError> {
        let settings = match form.to_settings() {
            Ok(s) => s,
            Err(e) => {
                self.notices.error(e.to_string());
                return Err(e);
            }
        };
        match self.gateway.put_settings(&settings) {
            Ok(saved) => {
                self.store.replace_settings(saved);
                self.redraw_dashboard();
                self.notices.success("Settings saved");
                Ok(())
            }
            Err(e) => {
                self.notices.error(e.notice_text("Failed to save settings"));
                Err(e)
            }
        }
    }

    fn report_form_failure(&mut self, mode: FormMode, e: ApiError, fallback: &str) -> ApiError {
        let text = e.notice_text(fallback);
        match mode {
            FormMode::Create => self.create_form.fail(text.clone()),
            FormMode::Edit => self.edit_form.fail(text.clone()),
        }
        self.notices.error(text);
        e
    }
}

//! User-facing strings.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Picks a locale from a Telegram `language_code` such as `en-US`.
    pub fn from_language_code(code: Option<&str>) -> Self {
        match code.map(|c| c.split(['-', '_']).next().unwrap_or(c)) {
            Some(lang) if lang.eq_ignore_ascii_case("en") => Self::En,
            _ => Self::Ru,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    HostUnavailable,
    BalanceLoadFailed,
    HistoryLoadFailed,
    InvalidTransferForm,
    TransferFailed,
    ConnectionFailed,
    NoTransactions,
    Loading,
    LoadMore,
    Sending,
    Send,
    Back,
    Balance,
    RecipientPlaceholder,
    AmountPlaceholder,
    SystemParty,
    GenericTransaction,
    NavDashboard,
    NavTransfer,
    NavHistory,
}

impl Text {
    pub fn get(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ru => self.ru(),
            Locale::En => self.en(),
        }
    }

    fn ru(self) -> &'static str {
        match self {
            Self::HostUnavailable => "Ошибка загрузки Telegram WebApp",
            Self::BalanceLoadFailed => "Ошибка загрузки баланса",
            Self::HistoryLoadFailed => "Ошибка загрузки истории",
            Self::InvalidTransferForm => "Заполните все поля корректно",
            Self::TransferFailed => "Ошибка перевода",
            Self::ConnectionFailed => "Ошибка соединения",
            Self::NoTransactions => "Нет транзакций",
            Self::Loading => "Загрузка...",
            Self::LoadMore => "Загрузить еще",
            Self::Sending => "Отправка...",
            Self::Send => "Перевести",
            Self::Back => "Назад",
            Self::Balance => "Баланс",
            Self::RecipientPlaceholder => "ID или @username",
            Self::AmountPlaceholder => "Сумма",
            Self::SystemParty => "Система",
            Self::GenericTransaction => "Транзакция",
            Self::NavDashboard => "Главная",
            Self::NavTransfer => "Перевод",
            Self::NavHistory => "История",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Self::HostUnavailable => "Failed to load Telegram WebApp",
            Self::BalanceLoadFailed => "Failed to load balance",
            Self::HistoryLoadFailed => "Failed to load history",
            Self::InvalidTransferForm => "Please fill in all fields correctly",
            Self::TransferFailed => "Transfer failed",
            Self::ConnectionFailed => "Connection error",
            Self::NoTransactions => "No transactions",
            Self::Loading => "Loading...",
            Self::LoadMore => "Load more",
            Self::Sending => "Sending...",
            Self::Send => "Send",
            Self::Back => "Back",
            Self::Balance => "Balance",
            Self::RecipientPlaceholder => "ID or @username",
            Self::AmountPlaceholder => "Amount",
            Self::SystemParty => "System",
            Self::GenericTransaction => "Transaction",
            Self::NavDashboard => "Home",
            Self::NavTransfer => "Transfer",
            Self::NavHistory => "History",
        }
    }
}

pub fn transfer_succeeded(locale: Locale, amount: u64, recipient: &str) -> String {
    match locale {
        Locale::Ru => format!("Успешно переведено {amount}₽ пользователю {recipient}"),
        Locale::En => format!("Sent {amount}₽ to {recipient}"),
    }
}

pub fn received_from(locale: Locale, name: &str) -> String {
    match locale {
        Locale::Ru => format!("От {name}"),
        Locale::En => format!("From {name}"),
    }
}

pub fn sent_to(locale: Locale, name: &str) -> String {
    match locale {
        Locale::Ru => format!("К {name}"),
        Locale::En => format!("To {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_from_language_code() {
        assert_eq!(Locale::from_language_code(Some("en")), Locale::En);
        assert_eq!(Locale::from_language_code(Some("en-US")), Locale::En);
        assert_eq!(Locale::from_language_code(Some("EN_gb")), Locale::En);
        assert_eq!(Locale::from_language_code(Some("ru")), Locale::Ru);
        assert_eq!(Locale::from_language_code(Some("de")), Locale::Ru);
        assert_eq!(Locale::from_language_code(None), Locale::Ru);
    }

    #[test]
    fn texts_differ_per_locale() {
        assert_eq!(Text::ConnectionFailed.get(Locale::Ru), "Ошибка соединения");
        assert_eq!(Text::ConnectionFailed.get(Locale::En), "Connection error");
    }

    #[test]
    fn transfer_success_message() {
        assert_eq!(
            transfer_succeeded(Locale::Ru, 150, "Bob"),
            "Успешно переведено 150₽ пользователю Bob"
        );
        assert_eq!(transfer_succeeded(Locale::En, 150, "Bob"), "Sent 150₽ to Bob");
    }
}

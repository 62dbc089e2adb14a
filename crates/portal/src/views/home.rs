use std::fmt;

use super::{heading, section};
use crate::error::Result;
use crate::storage::KeyValueBackend;
use crate::store::{PortalStore, Setting};

const ANTHEM: &[&str] = &[
    "Союз нерушимый республик свободных",
    "Сплотила навеки Великая Русь.",
    "Да здравствует созданный волей народов",
    "Единый, могучий Советский Союз!",
    "",
    "Славься, Отечество наше свободное,",
    "Дружбы народов надёжный оплот!",
    "Партия Ленина — сила народная",
    "Нас к торжеству коммунизма ведёт!",
];

const FEATURES: &[(&str, &str)] = &[
    (
        "Структура власти",
        "Полная информация о руководстве и должностных лицах",
    ),
    (
        "Новости государства",
        "Актуальные события и постановления ЦК КПСС",
    ),
    (
        "Развитие городов",
        "Строительство Люберец и других населённых пунктов",
    ),
];

/// Landing page: announcement and server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    pub announcement: String,
    pub server_ip: String,
    admin: bool,
}

impl HomePage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        Ok(Self {
            announcement: store.setting(Setting::Announcement)?,
            server_ip: store.setting(Setting::ServerIp)?,
            admin,
        })
    }
}

impl fmt::Display for HomePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Центральный Комитет Коммунистической Партии Советского Союза")?;
        writeln!(f, "Городской округ Люберцы")?;

        section(f, "Важное объявление")?;
        writeln!(f, "  {}", self.announcement)?;
        if self.admin {
            writeln!(f, "  (settings set importantAnnouncement <текст>)")?;
        }

        section(f, "Подключение к серверу")?;
        writeln!(f, "  IP адрес сервера: {}", self.server_ip)?;

        section(f, "Государственный гимн")?;
        for line in ANTHEM {
            writeln!(f, "  {line}")?;
        }

        section(f, "О портале")?;
        for (title, text) in FEATURES {
            writeln!(f, "  {title}: {text}")?;
        }
        Ok(())
    }
}

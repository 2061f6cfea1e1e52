//! One-shot banner messages carried across a redirect.
//!
//! Handlers redirect with `?success=<code>` or `?error=<code>`; the page maps
//! the code back to a message. Unknown codes are ignored, so nothing typed
//! into the URL bar ends up on the page.

/// Banner color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
        }
    }
}

/// Every message the admin can show after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    SettingsSaved,
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    EditCancelled,
    UnknownProduct,
    NotCustom,
    SaveFailed,
}

impl Flash {
    const SUCCESS: [Self; 5] = [
        Self::SettingsSaved,
        Self::ProductCreated,
        Self::ProductUpdated,
        Self::ProductDeleted,
        Self::EditCancelled,
    ];
    const ERROR: [Self; 3] = [Self::UnknownProduct, Self::NotCustom, Self::SaveFailed];

    /// Code used in the redirect query string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SettingsSaved => "saved",
            Self::ProductCreated => "created",
            Self::ProductUpdated => "updated",
            Self::ProductDeleted => "deleted",
            Self::EditCancelled => "cancelled",
            Self::UnknownProduct => "unknown_product",
            Self::NotCustom => "not_custom",
            Self::SaveFailed => "save_failed",
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FlashKind {
        match self {
            Self::SettingsSaved
            | Self::ProductCreated
            | Self::ProductUpdated
            | Self::ProductDeleted
            | Self::EditCancelled => FlashKind::Success,
            Self::UnknownProduct | Self::NotCustom | Self::SaveFailed => FlashKind::Error,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::SettingsSaved => "Configurações salvas com sucesso!",
            Self::ProductCreated => "Produto criado com sucesso!",
            Self::ProductUpdated => "Produto atualizado com sucesso!",
            Self::ProductDeleted => "Produto excluído com sucesso!",
            Self::EditCancelled => "Edição cancelada.",
            Self::UnknownProduct => "Produto não encontrado.",
            Self::NotCustom => "Apenas produtos personalizados podem ser excluídos.",
            Self::SaveFailed => "Não foi possível salvar as configurações. Tente novamente.",
        }
    }

    /// Pick the banner for a page view. Errors win over successes.
    #[must_use]
    pub fn from_query(success: Option<&str>, error: Option<&str>) -> Option<Self> {
        let find = |list: &[Self], code: Option<&str>| {
            code.and_then(|code| list.iter().copied().find(|f| f.code() == code))
        };
        find(&Self::ERROR, error).or_else(|| find(&Self::SUCCESS, success))
    }

    /// Redirect target showing this banner on `tab`.
    #[must_use]
    pub fn redirect_url(&self, tab: super::Tab) -> String {
        let param = match self.kind() {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        };
        format!("/?tab={tab}&{param}={}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tab;

    #[test]
    fn test_from_query() {
        assert_eq!(
            Flash::from_query(Some("created"), None),
            Some(Flash::ProductCreated)
        );
        assert_eq!(
            Flash::from_query(Some("saved"), Some("save_failed")),
            Some(Flash::SaveFailed)
        );
        assert_eq!(Flash::from_query(Some("<script>"), None), None);
        // a success code in the error slot is not an error
        assert_eq!(Flash::from_query(None, Some("created")), None);
    }

    #[test]
    fn test_redirect_url() {
        assert_eq!(
            Flash::ProductDeleted.redirect_url(Tab::Products),
            "/?tab=products&success=deleted"
        );
        assert_eq!(
            Flash::NotCustom.redirect_url(Tab::Products),
            "/?tab=products&error=not_custom"
        );
    }
}

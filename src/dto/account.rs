use serde::{Deserialize, Serialize};

/// Body of `POST /account/login` and `POST /account/register`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// What an account page echoes back into its form. The password never is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountEcho {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AccountPage {
    pub form: AccountEcho,
}

impl AccountPage {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            form: AccountEcho::default(),
        }
    }

    #[must_use]
    pub fn echo(form: &CredentialsForm) -> Self {
        Self {
            form: AccountEcho {
                username: form.username.clone(),
            },
        }
    }
}

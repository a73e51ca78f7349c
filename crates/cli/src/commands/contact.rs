//! Contact detail commands.
//!
//! Input is validated here; the shop stores whatever it is given.
//!
//! # Usage
//!
//! ```bash
//! gs-cli contact email buyer@example.com
//! gs-cli contact phone "(555) 123-4567" --country-code 1 --iso US
//! ```

use giftshelf_core::{Email, PhoneCountryInfo, PhoneNumber};
use giftshelf_shop::ShopAction;
use tracing::info;

use super::{CliError, Session};

/// Store the purchase email.
///
/// # Errors
///
/// Returns an error if the email is malformed or the snapshot cannot be saved.
pub async fn email(session: &mut Session, email: &str) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    info!(domain = email.as_str().rsplit('@').next().unwrap_or_default(), "Updating email");
    session
        .apply(ShopAction::EmailUpdated {
            email: email.into_inner(),
        })
        .await?;
    Ok(())
}

/// Store the phone number together with its country.
///
/// # Errors
///
/// Returns an error if the phone number is malformed or the snapshot cannot be saved.
pub async fn phone(
    session: &mut Session,
    phone: &str,
    country_code: String,
    iso: String,
) -> Result<(), CliError> {
    let phone = PhoneNumber::parse(phone)?;
    let country = PhoneCountryInfo::new(
        country_code.trim_start_matches('+'),
        iso.to_ascii_uppercase(),
    );
    info!(country = %country.country_iso_code, "Updating phone");
    session
        .apply(ShopAction::PhoneUpdated {
            phone: phone.into_inner(),
            phone_country_info: country,
        })
        .await?;
    Ok(())
}

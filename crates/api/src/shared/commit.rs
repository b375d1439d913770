use crate::error::BazaarError;
use bazaar_domain::{Account, Geolocation, InvalidAccountField};
use bazaar_infra::BazaarContext;

/// Field changes to apply to an `Account` before it is written.
///
/// This replaces implicit pre-save hooks with an explicit change set: a
/// field is only touched when the caller put it here. In particular the
/// password is only hashed when it actually changed, and the address is
/// only geocoded when it actually changed.
#[derive(Debug, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug)]
pub enum CommitError {
    InvalidField(InvalidAccountField),
    /// The geocoding service failed or had no match for the address.
    Geocoding(String),
}

impl From<CommitError> for BazaarError {
    fn from(e: CommitError) -> Self {
        match e {
            CommitError::InvalidField(e) => Self::BadClientData(e.to_string()),
            CommitError::Geocoding(e) => Self::BadClientData(e),
        }
    }
}

/// Runs the ordered transform stages over `account`. The first failing
/// stage halts the pipeline, and the caller must not write the account
/// after a failure.
pub async fn apply_changes(
    account: &mut Account,
    changes: AccountChanges,
    ctx: &BazaarContext,
) -> Result<(), CommitError> {
    if let Some(name) = changes.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CommitError::InvalidField(InvalidAccountField::EmptyName));
        }
        account.name = name;
    }

    // An absent password skips this stage entirely, it never hashes an
    // empty string.
    if let Some(password) = changes.password {
        account
            .set_password(&password)
            .map_err(CommitError::InvalidField)?;
    }

    if let Some(address) = changes.address {
        let results = ctx
            .geocoder
            .geocode(&address)
            .await
            .map_err(|e| CommitError::Geocoding(format!("Unable to geocode address: {}", e)))?;
        let best_match = results.into_iter().next().ok_or_else(|| {
            CommitError::Geocoding(format!("No geocoding match for address: {}", address))
        })?;

        account.geolocation = Some(Geolocation {
            coordinates: [best_match.longitude, best_match.latitude],
            formatted_address: best_match.formatted_address,
            street: best_match.street,
            city: best_match.city,
            state: best_match.state_code,
            zipcode: best_match.zipcode,
            country: best_match.country_code,
        });
        account.address = Some(address);
    }

    Ok(())
}

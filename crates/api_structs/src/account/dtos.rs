use bazaar_domain::{Account, Geolocation, Role};
use serde::{Deserialize, Serialize};

/// Public representation of an `Account`. The password hash and the reset
/// token fields deliberately have no place here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDTO {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub address: Option<String>,
    pub geolocation: Option<GeolocationDTO>,
    pub created_at: i64,
}

impl AccountDTO {
    pub fn new(account: &Account) -> Self {
        Self {
            id: account.id.as_string(),
            name: account.name.clone(),
            email: account.email.as_str().to_string(),
            role: account.role,
            address: account.address.clone(),
            geolocation: account.geolocation.as_ref().map(GeolocationDTO::new),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationDTO {
    pub coordinates: [f64; 2],
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl GeolocationDTO {
    pub fn new(geolocation: &Geolocation) -> Self {
        Self {
            coordinates: geolocation.coordinates,
            formatted_address: geolocation.formatted_address.clone(),
            street: geolocation.street.clone(),
            city: geolocation.city.clone(),
            state: geolocation.state.clone(),
            zipcode: geolocation.zipcode.clone(),
            country: geolocation.country.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bazaar_domain::Email;

    #[test]
    fn serialized_account_never_contains_the_password() {
        let mut account = Account::new(Email::new("a@x.com").unwrap(), Role::Seller, 0);
        account.name = "A".into();
        account.set_password("secret1").unwrap();
        account.generate_reset_token(0);

        let json = serde_json::to_value(AccountDTO::new(&account)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("passwordResetToken"));
        assert!(!obj.contains_key("passwordResetExpires"));
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "seller");
    }
}

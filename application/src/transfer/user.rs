use kernel::prelude::entity::{DestructUser, User};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser { id, name, email } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

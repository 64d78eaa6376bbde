pub mod mock_relying_party;
pub mod test_setup;

pub use fake_platform::FakeAuthenticator;
pub use mock_relying_party::MockRelyingParty;
pub use test_setup::Browser;

/// Credentials for a user created during the suite.
pub struct TestUser {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

pub const ALICE: TestUser = TestUser {
    email: "a@x.com",
    password: "pw1",
    name: "Alice",
};

pub const BOB: TestUser = TestUser {
    email: "b@x.com",
    password: "pw2",
    name: "Bob",
};

/// Never joins anything.
pub const MALLORY: TestUser = TestUser {
    email: "m@x.com",
    password: "pw3",
    name: "Mallory",
};

/// Smallest valid PNG, a single transparent pixel.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Passwords that show up at the top of every breach dump.
pub(super) const COMMONLY_USED_PASSWORDS: &[&str] = &[
    "123456",
    "12345678",
    "123456789",
    "1234567890",
    "12345",
    "1234",
    "111111",
    "000000",
    "123123",
    "654321",
    "666666",
    "7777777",
    "1q2w3e4r",
    "1qaz2wsx",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "azerty",
    "asdfghjkl",
    "zxcvbnm",
    "password",
    "password1",
    "password123",
    "passw0rd",
    "p@ssw0rd",
    "wachtwoord",
    "wachtwoord1",
    "wachtwoord123",
    "welkom",
    "welkom01",
    "welkom123",
    "welcome",
    "welcome1",
    "letmein",
    "iloveyou",
    "admin",
    "admin123",
    "administrator",
    "abc123",
    "abcdefg",
    "monkey",
    "dragon",
    "football",
    "baseball",
    "sunshine",
    "princess",
    "master",
    "shadow",
    "superman",
    "trustno1",
    "starwars",
    "whatever",
    "michael",
    "jennifer",
    "ajax1900",
    "feyenoord",
    "amsterdam",
    "rotterdam",
    "nederland",
    "holland",
    "geheim",
    "geheim123",
    "zomer2024",
    "winter2024",
    "notifynl",
];

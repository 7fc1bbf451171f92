use rand::Rng;

pub const PASSWORD_LENGTH: usize = 12;

/// ASCII letters, digits and ASCII punctuation.
pub const PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub fn generate_password() -> String {
    generate_password_with(&mut rand::thread_rng())
}

/// Draws `PASSWORD_LENGTH` characters uniformly, with replacement.
pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PASSWORD_LENGTH)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

use rand::Rng;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Random password over letters, digits and ASCII punctuation, the same
/// alphabet the password exercise asks the learner to use.
pub fn generate<R: Rng>(rng: &mut R, length: usize) -> String {
    let alphabet: Vec<char> = LETTERS
        .chars()
        .chain(DIGITS.chars())
        .chain(PUNCTUATION.chars())
        .collect();
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

pub fn samples<R: Rng>(rng: &mut R, length: usize, count: usize) -> Vec<String> {
    (0..count).map(|_| generate(rng, length)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_length_and_alphabet() {
        let mut rng = SmallRng::seed_from_u64(7);
        let password = generate(&mut rng, 32);
        assert_eq!(password.chars().count(), 32);
        assert!(password.chars().all(|c| c.is_ascii_graphic()));
    }

    #[test]
    fn test_samples_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let passwords = samples(&mut rng, 10, 5);
        assert_eq!(passwords.len(), 5);
        assert!(passwords.iter().all(|p| p.len() == 10));
    }

    #[test]
    fn test_zero_length_is_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(generate(&mut rng, 0).is_empty());
    }
}

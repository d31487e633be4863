use std::iter;

use radix;
use rand::{distributions::Alphanumeric, prelude::thread_rng, Rng};

/// Builds the 6 character join code for a room out of its row id. The base-36
/// form of the id keeps codes unique without a generate-and-retry loop; short
/// ids get padded up to 6 with random alphanumerics.
pub fn create_code_from_id(id: i32) -> String {
    let id = format!("{}", id);
    let r = radix::RadixNum::from_str(&id, 10).unwrap();
    let r = r.with_radix(36).unwrap();
    let code = r.as_str();
    if 6i32 - code.len() as i32 > 0 {
        let len = 6 - code.len();
        let mut rng = thread_rng();
        return format!(
            "{}{}",
            code,
            iter::repeat(())
                .map(|()| rng.sample(Alphanumeric))
                .take(len)
                .collect::<String>()
        )
        .to_uppercase();
    }

    code.to_uppercase()
}

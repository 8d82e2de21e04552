// src/services/baseline.rs
//
// Last-resort dataset for the recovery chain. These are the original 41
// investor profiles, frozen in code so the final recovery stage can never
// fail. Investments and transactions are not part of the baseline; only the
// investor roster is guaranteed.
use crate::models::{Dataset, Investor, InvestorStatus};

pub const BASELINE_VERSION: &str = "baseline-v1";
pub const BASELINE_INVESTOR_COUNT: usize = 41;

const ROSTER: [(&str, &str, &str); BASELINE_INVESTOR_COUNT] = [
    ("Margaret Whitfield", "margaret.whitfield@example.com", "+1-555-0101"),
    ("Arjun Mehta", "arjun.mehta@example.com", "+1-555-0102"),
    ("Helen Okafor", "helen.okafor@example.com", "+1-555-0103"),
    ("Thomas Reiner", "thomas.reiner@example.com", "+1-555-0104"),
    ("Priya Natarajan", "priya.natarajan@example.com", "+1-555-0105"),
    ("Samuel Boateng", "samuel.boateng@example.com", "+1-555-0106"),
    ("Ingrid Halvorsen", "ingrid.halvorsen@example.com", "+1-555-0107"),
    ("Carlos Menendez", "carlos.menendez@example.com", "+1-555-0108"),
    ("Yuki Tanabe", "yuki.tanabe@example.com", "+1-555-0109"),
    ("Fatima Al-Rashid", "fatima.alrashid@example.com", "+1-555-0110"),
    ("George Papadakis", "george.papadakis@example.com", "+1-555-0111"),
    ("Linda Osei", "linda.osei@example.com", "+1-555-0112"),
    ("Viktor Sokolov", "viktor.sokolov@example.com", "+1-555-0113"),
    ("Amara Diallo", "amara.diallo@example.com", "+1-555-0114"),
    ("Peter Vandenberg", "peter.vandenberg@example.com", "+1-555-0115"),
    ("Rosa Camacho", "rosa.camacho@example.com", "+1-555-0116"),
    ("David Lindqvist", "david.lindqvist@example.com", "+1-555-0117"),
    ("Nadia Hassan", "nadia.hassan@example.com", "+1-555-0118"),
    ("Oliver Grantham", "oliver.grantham@example.com", "+1-555-0119"),
    ("Chen Wei", "chen.wei@example.com", "+1-555-0120"),
    ("Beatrice Mwangi", "beatrice.mwangi@example.com", "+1-555-0121"),
    ("Marcus Thorne", "marcus.thorne@example.com", "+1-555-0122"),
    ("Sofia Petrova", "sofia.petrova@example.com", "+1-555-0123"),
    ("Daniel Oyelaran", "daniel.oyelaran@example.com", "+1-555-0124"),
    ("Hannah Rosenbaum", "hannah.rosenbaum@example.com", "+1-555-0125"),
    ("Rajesh Iyer", "rajesh.iyer@example.com", "+1-555-0126"),
    ("Claire Beaumont", "claire.beaumont@example.com", "+1-555-0127"),
    ("Stefan Ionescu", "stefan.ionescu@example.com", "+1-555-0128"),
    ("Aisha Bakari", "aisha.bakari@example.com", "+1-555-0129"),
    ("Michael Donahue", "michael.donahue@example.com", "+1-555-0130"),
    ("Leila Farouk", "leila.farouk@example.com", "+1-555-0131"),
    ("Anders Kjellberg", "anders.kjellberg@example.com", "+1-555-0132"),
    ("Gloria Santamaria", "gloria.santamaria@example.com", "+1-555-0133"),
    ("Kwame Asante", "kwame.asante@example.com", "+1-555-0134"),
    ("Elena Vasquez", "elena.vasquez@example.com", "+1-555-0135"),
    ("Patrick O'Shaughnessy", "patrick.oshaughnessy@example.com", "+1-555-0136"),
    ("Mei-Ling Chou", "meiling.chou@example.com", "+1-555-0137"),
    ("Robert Ashworth", "robert.ashworth@example.com", "+1-555-0138"),
    ("Zainab Olusanya", "zainab.olusanya@example.com", "+1-555-0139"),
    ("Henrik Dahlgren", "henrik.dahlgren@example.com", "+1-555-0140"),
    ("Catherine Moreau", "catherine.moreau@example.com", "+1-555-0141"),
];

pub fn baseline_dataset() -> Dataset {
    let investors = ROSTER
        .iter()
        .enumerate()
        .map(|(i, &(full_name, email, phone))| {
            let first_name = full_name.split(' ').next().unwrap_or(full_name);
            let username = email.split('@').next().unwrap_or(email);
            Investor {
                id: (i + 1) as u64,
                full_name: full_name.to_string(),
                first_name: first_name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                username: username.to_string(),
                status: InvestorStatus::Active,
            }
        })
        .collect();

    Dataset {
        investors,
        investments: Vec::new(),
        transactions: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_has_the_original_forty_one() {
        let data = baseline_dataset();
        assert_eq!(data.investors.len(), BASELINE_INVESTOR_COUNT);
        assert!(!data.is_empty());
    }

    #[test]
    fn baseline_ids_are_sequential_and_unique() {
        let data = baseline_dataset();
        for (i, inv) in data.investors.iter().enumerate() {
            assert_eq!(inv.id, (i + 1) as u64);
        }
    }
}

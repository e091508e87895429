#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sign {
    /// Path segment used by the star rating page, also the command choice value
    pub slug: &'static str,
    pub display: &'static str,
    /// Numeric id the daily horoscope page expects
    pub api_id: u8,
    pub colour: u32,
}

#[rustfmt::skip]
pub static SIGNS: [Sign; 12] = [
    Sign { slug: "aries", display: "Aries", api_id: 1, colour: 0xC60000 },
    Sign { slug: "taurus", display: "Taurus", api_id: 2, colour: 0x179559 },
    Sign { slug: "gemini", display: "Gemini", api_id: 3, colour: 0x008080 },
    Sign { slug: "cancer", display: "Cancer", api_id: 4, colour: 0xB8C2CA },
    Sign { slug: "leo", display: "Leo", api_id: 5, colour: 0xA12600 },
    Sign { slug: "virgo", display: "Virgo", api_id: 6, colour: 0x08470B },
    Sign { slug: "libra", display: "Libra", api_id: 7, colour: 0xEA987F },
    Sign { slug: "scorpio", display: "Scorpio", api_id: 8, colour: 0x004040 },
    Sign { slug: "sagittarius", display: "Sagittarius", api_id: 9, colour: 0x64003F },
    Sign { slug: "capricorn", display: "Capricorn", api_id: 10, colour: 0x28251C },
    Sign { slug: "aquarius", display: "Aquarius", api_id: 11, colour: 0x015780 },
    Sign { slug: "pisces", display: "Pisces", api_id: 12, colour: 0x598F88 },
];

impl Sign {
    pub fn lookup(input: &str) -> Option<&'static Self> {
        let input = input.trim();
        SIGNS.iter().find(|sign| sign.slug.eq_ignore_ascii_case(input))
    }
}

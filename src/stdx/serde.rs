use serde::{self, Deserializer};

pub fn u32_from_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("u32 or string containing a u32")
        }

        fn visit_u64<E>(self, v: u64) -> Result<u32, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<u32, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_str<E>(self, v: &str) -> Result<u32, E>
        where
            E: serde::de::Error,
        {
            v.trim().parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(Visitor)
}

/// Like [`u32_from_string`], but `null` and a missing field become `0`.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct Wrapper(u32);

    impl<'de> serde::Deserialize<'de> for Wrapper {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            u32_from_string(deserializer).map(Wrapper)
        }
    }

    let count: Option<Wrapper> = serde::Deserialize::deserialize(deserializer)?;
    Ok(count.map_or(0, |count| count.0))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Count {
        #[serde(deserialize_with = "u32_from_string")]
        count: u32,
    }

    #[derive(Deserialize)]
    struct Optional {
        #[serde(default, deserialize_with = "u32_or_zero")]
        count: u32,
    }

    #[test]
    fn should_accept_number_and_string() {
        let number: Count = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        let string: Count = serde_json::from_str(r#"{"count": "12"}"#).unwrap();

        assert_eq!(12, number.count);
        assert_eq!(12, string.count);
    }

    #[test]
    fn should_reject_negative_count() {
        assert!(serde_json::from_str::<Count>(r#"{"count": -1}"#).is_err());
    }

    #[test]
    fn should_default_null_and_missing_to_zero() {
        let null: Optional = serde_json::from_str(r#"{"count": null}"#).unwrap();
        let missing: Optional = serde_json::from_str("{}").unwrap();

        assert_eq!(0, null.count);
        assert_eq!(0, missing.count);
    }
}

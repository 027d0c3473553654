//! Typed codec for stored values.
//!
//! Every value in the store (names, id lists, score sequences, the game
//! mode) round-trips through serde + bincode. The length-prefixed list
//! encoding replaces the delimiter-joined strings of older scoreboard data
//! layouts, which were one stray delimiter away from a parse failure.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::Result;

/// Encode a value for storage.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decode a stored value.
///
/// Fails with `ScoreboardError::Codec` on corrupt bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

/// Decode an optional stored value, substituting the type's default when
/// the key was absent.
///
/// This is the read side of the "missing string is empty, missing list is
/// empty" contract.
pub fn decode_or_default<T: DeserializeOwned + Default>(bytes: Option<Vec<u8>>) -> Result<T> {
    match bytes {
        Some(bytes) => decode(&bytes),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameId, GameMode, PlayerId};

    #[test]
    fn test_round_trip_ids_and_scores() {
        let ids = vec![GameId::new(1), GameId::new(3)];
        let decoded: Vec<GameId> = decode(&encode(&ids).unwrap()).unwrap();
        assert_eq!(decoded, ids);

        let scores = vec![5i64, -3, 0, i64::MAX];
        let decoded: Vec<i64> = decode(&encode(&scores).unwrap()).unwrap();
        assert_eq!(decoded, scores);

        let decoded: GameMode = decode(&encode(&GameMode::LowScore).unwrap()).unwrap();
        assert_eq!(decoded, GameMode::LowScore);
    }

    #[test]
    fn test_absent_key_reads_as_default() {
        let name: String = decode_or_default(None).unwrap();
        assert_eq!(name, "");

        let ids: Vec<PlayerId> = decode_or_default(None).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_corrupt_bytes_are_an_error() {
        let result: Result<Vec<i64>> = decode(&[0xff, 0x01]);
        assert!(result.is_err());
    }
}

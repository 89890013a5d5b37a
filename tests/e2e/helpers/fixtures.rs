use anyhow::Result;
use once_cell::sync::Lazy;
use std::io::Cursor;
use std::path::PathBuf;
use voice_clone_backend::domain::examples::AudioExample;
use voice_clone_backend::infrastructure::db::DbPool;

/// Mono 16-bit PCM sine tone encoded as WAV
pub fn sine_wav(duration_secs: f32, sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let total = (duration_secs * sample_rate as f32) as usize;
        for i in 0..total {
            let t = i as f32 / sample_rate as f32;
            let sample = (t * 220.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
            writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

static SPEAKER_WAV: Lazy<Vec<u8>> = Lazy::new(|| sine_wav(0.5, 16_000));

/// Short reference clip used by most tests
pub fn speaker_wav() -> Vec<u8> {
    SPEAKER_WAV.clone()
}

pub struct TestFixtures {
    pool: DbPool,
    examples_dir: PathBuf,
}

#[allow(dead_code)]
impl TestFixtures {
    pub fn new(pool: DbPool, examples_dir: PathBuf) -> Self {
        Self { pool, examples_dir }
    }

    /// Insert an example row and write its clip to the example store
    pub async fn create_example(&self, description: &str, language: &str) -> Result<AudioExample> {
        let filename = format!("example_fixture_{}.wav", uuid::Uuid::new_v4().simple());
        tokio::fs::write(self.examples_dir.join(&filename), speaker_wav()).await?;
        self.insert_row(description, &filename, language).await
    }

    /// Insert an example row whose audio file was never written
    pub async fn create_example_without_audio(&self, description: &str) -> Result<AudioExample> {
        self.insert_row(description, "example_missing.wav", "en-us")
            .await
    }

    pub fn example_path(&self, filename: &str) -> PathBuf {
        self.examples_dir.join(filename)
    }

    async fn insert_row(
        &self,
        description: &str,
        filename: &str,
        language: &str,
    ) -> Result<AudioExample> {
        let example = sqlx::query_as::<_, AudioExample>(
            r#"
            INSERT INTO audio_examples (description, filename, language)
            VALUES (?, ?, ?)
            RETURNING id, description, filename, language
            "#,
        )
        .bind(description)
        .bind(filename)
        .bind(language)
        .fetch_one(&self.pool)
        .await?;

        Ok(example)
    }
}

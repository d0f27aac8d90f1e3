//! Kokoro v1.0 voice catalogue.
//!
//! Every voice the downstream TTS library knows about is listed here. A small
//! subset ships inside the activity bundle; everything else is fetched on first
//! use into the voice cache (see [`crate::tts::resolve_voice_cache_dir`]).

/// Voices shipped with the activity. Never empty, independent of cache state.
pub const BUNDLED_VOICES: &[&str] = &["af_bella", "af_heart", "am_michael", "bf_emma", "bm_george"];

/// Spoken language of a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    AmericanEnglish,
    BritishEnglish,
    Spanish,
    French,
    Hindi,
    Italian,
    Japanese,
    BrazilianPortuguese,
    MandarinChinese,
}

impl Language {
    const ALL: [Language; 9] = [
        Language::AmericanEnglish,
        Language::BritishEnglish,
        Language::Spanish,
        Language::French,
        Language::Hindi,
        Language::Italian,
        Language::Japanese,
        Language::BrazilianPortuguese,
        Language::MandarinChinese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::AmericanEnglish => "American English",
            Language::BritishEnglish => "British English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Hindi => "Hindi",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::BrazilianPortuguese => "Portuguese BR",
            Language::MandarinChinese => "Mandarin Chinese",
        }
    }
}

/// Where a voice's assets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceSource {
    /// Part of the activity bundle.
    Bundled,
    /// Must be downloaded into the voice cache.
    Download,
}

impl std::fmt::Display for VoiceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceSource::Bundled => write!(f, "bundled"),
            VoiceSource::Download => write!(f, "download"),
        }
    }
}

/// A catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    pub name: &'static str,
    pub language: Language,
}

impl Voice {
    const fn new(name: &'static str, language: Language) -> Self {
        Self { name, language }
    }

    pub fn source(&self) -> VoiceSource {
        if is_bundled(self.name) { VoiceSource::Bundled } else { VoiceSource::Download }
    }
}

use Language::*;

// Sorted by name for binary search.
const VOICES: &[Voice] = &[
    Voice::new("af_alloy", AmericanEnglish),
    Voice::new("af_aoede", AmericanEnglish),
    Voice::new("af_bella", AmericanEnglish),
    Voice::new("af_heart", AmericanEnglish),
    Voice::new("af_jessica", AmericanEnglish),
    Voice::new("af_kore", AmericanEnglish),
    Voice::new("af_nicole", AmericanEnglish),
    Voice::new("af_nova", AmericanEnglish),
    Voice::new("af_river", AmericanEnglish),
    Voice::new("af_sarah", AmericanEnglish),
    Voice::new("af_sky", AmericanEnglish),
    Voice::new("am_adam", AmericanEnglish),
    Voice::new("am_echo", AmericanEnglish),
    Voice::new("am_eric", AmericanEnglish),
    Voice::new("am_fenrir", AmericanEnglish),
    Voice::new("am_liam", AmericanEnglish),
    Voice::new("am_michael", AmericanEnglish),
    Voice::new("am_onyx", AmericanEnglish),
    Voice::new("am_puck", AmericanEnglish),
    Voice::new("am_santa", AmericanEnglish),
    Voice::new("bf_alice", BritishEnglish),
    Voice::new("bf_emma", BritishEnglish),
    Voice::new("bf_isabella", BritishEnglish),
    Voice::new("bf_lily", BritishEnglish),
    Voice::new("bm_daniel", BritishEnglish),
    Voice::new("bm_fable", BritishEnglish),
    Voice::new("bm_george", BritishEnglish),
    Voice::new("bm_lewis", BritishEnglish),
    Voice::new("ef_dora", Spanish),
    Voice::new("em_alex", Spanish),
    Voice::new("ff_siwis", French),
    Voice::new("hf_alpha", Hindi),
    Voice::new("hf_beta", Hindi),
    Voice::new("hm_omega", Hindi),
    Voice::new("hm_psi", Hindi),
    Voice::new("if_sara", Italian),
    Voice::new("im_nicola", Italian),
    Voice::new("jf_alpha", Japanese),
    Voice::new("jf_gongitsune", Japanese),
    Voice::new("jf_nezumi", Japanese),
    Voice::new("jf_tebukuro", Japanese),
    Voice::new("jm_kumo", Japanese),
    Voice::new("pf_dora", BrazilianPortuguese),
    Voice::new("pm_alex", BrazilianPortuguese),
    Voice::new("pm_santa", BrazilianPortuguese),
    Voice::new("zf_xiaobei", MandarinChinese),
    Voice::new("zf_xiaoni", MandarinChinese),
    Voice::new("zf_xiaoxiao", MandarinChinese),
    Voice::new("zf_xiaoyi", MandarinChinese),
    Voice::new("zm_yunjian", MandarinChinese),
    Voice::new("zm_yunxi", MandarinChinese),
    Voice::new("zm_yunxia", MandarinChinese),
    Voice::new("zm_yunyang", MandarinChinese),
];

/// Look up a voice by name.
pub fn get_voice(name: &str) -> Option<&'static Voice> {
    VOICES.binary_search_by_key(&name, |v| v.name).ok().map(|idx| &VOICES[idx])
}

pub fn is_bundled(name: &str) -> bool {
    BUNDLED_VOICES.contains(&name)
}

/// Print the catalogue grouped by language.
pub fn print_voices() {
    println!("Kokoro TTS v1.0 - {} voices, {} bundled", VOICES.len(), BUNDLED_VOICES.len());

    for lang in Language::ALL {
        let voices: Vec<_> = VOICES.iter().filter(|v| v.language == lang).collect();

        println!("\n── {} ({} voices) ──", lang.label(), voices.len());
        println!("{:<15} SOURCE", "VOICE");
        println!("{}", "─".repeat(30));

        for voice in voices {
            println!("{:<15} {}", voice.name, voice.source());
        }
    }

    println!();
    println!("Bundled voices work offline. Others are downloaded into the voice cache on first use.");
}

/// Print details about a single voice.
pub fn print_voice_info(name: &str) -> anyhow::Result<()> {
    let voice = get_voice(name).ok_or_else(|| anyhow::anyhow!("Voice '{}' not found. Run with --list-voices to see available voices", name))?;

    println!();
    println!("Voice:     {}", voice.name);
    println!("{}", "─".repeat(30));
    println!("Language:  {}", voice.language.label());
    println!("Source:    {}", voice.source());
    println!();

    Ok(())
}

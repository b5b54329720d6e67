pub mod mfatokens;

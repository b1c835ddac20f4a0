pub fn is_env_enable(env_name: &str) -> bool {
	match std::env::var(env_name) {
		Ok(s) => is_truthy(&s),
		Err(_) => false
	}
}

fn is_truthy(value: &str) -> bool {
	vec!["1", "true", "yes", "oui"].contains(&value.to_lowercase().as_str())
}

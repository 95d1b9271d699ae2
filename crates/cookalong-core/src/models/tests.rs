#[cfg(test)]
mod model_tests {
    use std::str::FromStr;

    use jiff::Timestamp;

    use crate::models::{
        ChatMessage, ChatRole, CookMode, Ingredient, Recipe, RecipeOrigin, RecipeStep,
        RecipeSummary, SessionStatus, TimerStatus,
    };

    fn create_test_recipe() -> Recipe {
        Recipe {
            id: 12,
            title: "Shakshuka".to_string(),
            summary: Some("Eggs poached in spiced tomato sauce".to_string()),
            origin: RecipeOrigin::Cached,
            external_id: Some("spoon-1234".to_string()),
            servings: Some(2),
            ready_minutes: Some(35),
            favorite: false,
            ingredients: vec![Ingredient {
                name: "eggs".to_string(),
                amount: Some("4".to_string()),
            }],
            steps: vec![
                RecipeStep::new(1, "Sweat the onions"),
                RecipeStep::new(2, "Add tomatoes and simmer 10 minutes"),
                RecipeStep::new(3, "Crack in the eggs"),
            ],
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    #[test]
    fn test_recipe_step_lookup_is_one_based() {
        let recipe = create_test_recipe();
        assert_eq!(recipe.step(1).unwrap().instruction, "Sweat the onions");
        assert_eq!(recipe.step(3).unwrap().instruction, "Crack in the eggs");
        assert!(recipe.step(0).is_none());
        assert!(recipe.step(4).is_none());
    }

    #[test]
    fn test_summary_from_recipe() {
        let recipe = create_test_recipe();
        let summary = RecipeSummary::from(&recipe);
        assert_eq!(summary.id, 12);
        assert_eq!(summary.step_count, 3);
        assert_eq!(summary.origin, RecipeOrigin::Cached);
        assert_eq!(summary.updated_at, recipe.updated_at);
    }

    #[test]
    fn test_session_status_flags() {
        assert!(!SessionStatus::NotStarted.is_in_progress());
        assert!(SessionStatus::Active.is_in_progress());
        assert!(SessionStatus::Paused.is_in_progress());
        assert!(!SessionStatus::Completed.is_in_progress());
        assert_eq!(SessionStatus::default(), SessionStatus::NotStarted);
        assert_eq!(SessionStatus::Paused.with_icon(), "⏸ Paused");
    }

    #[test]
    fn test_timer_status_visibility() {
        assert!(TimerStatus::Running.is_visible());
        assert!(TimerStatus::Paused.is_visible());
        assert!(!TimerStatus::Idle.is_visible());
        assert!(!TimerStatus::Completed.is_visible());
        assert!(TimerStatus::Cancelled.is_terminal());
        assert!(!TimerStatus::Paused.is_terminal());
    }

    #[test]
    fn test_parse_origin_and_mode() {
        assert_eq!(RecipeOrigin::from_str("cached").unwrap(), RecipeOrigin::Cached);
        assert_eq!(RecipeOrigin::from_str("USER").unwrap(), RecipeOrigin::User);
        assert!(RecipeOrigin::from_str("imported").is_err());
        assert_eq!(CookMode::from_str("Voice").unwrap(), CookMode::Voice);
        assert!(CookMode::from_str("robot").is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::NotStarted).unwrap(),
            "\"not_started\""
        );
        assert_eq!(serde_json::to_string(&CookMode::Voice).unwrap(), "\"voice\"");
        assert_eq!(serde_json::to_string(&ChatRole::Assistant).unwrap(), "\"assistant\"");

        let recipe = create_test_recipe();
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["origin"], "cached");
        assert_eq!(json["steps"][1]["number"], 2);
    }

    #[test]
    fn test_chat_message_constructors() {
        let question = ChatMessage::user("Can I skip the cumin?");
        assert_eq!(question.role, ChatRole::User);
        let answer = ChatMessage::assistant("Yes, use paprika instead.");
        assert_eq!(answer.role, ChatRole::Assistant);
        assert!(answer.timestamp >= question.timestamp);
    }
}

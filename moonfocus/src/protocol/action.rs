use ufmt_macros::uDebug;

/// Action code of a command.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum ActionCode {
    /// `DB`: turn diagnostic logging on (argument > 0) or off.
    SetDebug,
    /// `FQ`: emergency stop.
    Halt,
    /// `FG`: go to the target position.
    GoToTarget,
    /// `GH`: query half-step mode.
    HalfStepStatus,
    /// `GC`: query temperature coefficient.
    TempCoefficient,
    /// `GI`: query whether the focuser is moving.
    MovingStatus,
    /// `GN`: query the target position.
    TargetPosition,
    /// `GP`: query the current position.
    CurrentPosition,
    /// `GT`: query the temperature.
    Temperature,
    /// `GV`: query the firmware version.
    Version,
    /// `GD`: query the step delay.
    StepDelay,
    /// `SD`: set the step delay.
    SetStepDelay,
    /// `SF`: full-step mode; restores nominal direction after a re-zero.
    FullStep,
    /// `SH`: half-step mode; starts the re-zero gesture.
    HalfStep,
    /// `SN`: set the target position.
    SetTarget,
    /// `SP`: set the current position. Reserved.
    SetPosition,
    /// `YT`: set maximum travel. Reserved.
    SetMaxTravel,
    /// `YB`: set backlash. Reserved.
    SetBacklash,
    /// `ZB`: query backlash. Reserved.
    Backlash,
    /// `ZT`: query maximum steps. Reserved.
    MaxSteps,
    /// `ZA`: query average temperature. Reserved.
    AverageTemperature,
    /// Anything else.
    Unrecognized,
}
impl ActionCode {
    /// Looks up the action for a one or two character code.
    pub fn from_code(code: &str) -> ActionCode {
        use ActionCode::*;
        match code {
            "DB" => SetDebug,
            "FQ" => Halt,
            "FG" => GoToTarget,
            "GH" => HalfStepStatus,
            "GC" => TempCoefficient,
            "GI" => MovingStatus,
            "GN" => TargetPosition,
            "GP" => CurrentPosition,
            "GT" => Temperature,
            "GV" => Version,
            "GD" => StepDelay,
            "SD" => SetStepDelay,
            "SF" => FullStep,
            "SH" => HalfStep,
            "SN" => SetTarget,
            "SP" => SetPosition,
            "YT" => SetMaxTravel,
            "YB" => SetBacklash,
            "ZB" => Backlash,
            "ZT" => MaxSteps,
            "ZA" => AverageTemperature,
            _ => Unrecognized,
        }
    }

    /// Returns `true` for codes whose frame carries a hexadecimal argument.
    pub fn takes_argument(&self) -> bool {
        use ActionCode::*;
        matches!(
            self,
            SetTarget
                | SetPosition
                | SetMaxTravel
                | SetBacklash
                | SetDebug
                | SetStepDelay
        )
    }
}
